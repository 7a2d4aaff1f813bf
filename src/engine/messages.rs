/// A single control interaction, as the presentation layer reports it.
/// Values arrive raw; the engine validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    /// Dropdown: a new stock symbol
    SymbolChanged(String),
    /// Slider: a new window position (0..=6)
    WindowChanged(i64),
    /// Radio: a new price field name
    FieldChanged(String),
}

impl ControlEvent {
    /// Does this event invalidate the filtered slice, or only the summary?
    pub fn needs_refilter(&self) -> bool {
        matches!(
            self,
            ControlEvent::SymbolChanged(_) | ControlEvent::WindowChanged(_)
        )
    }
}
