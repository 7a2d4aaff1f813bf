//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every flag is additionally gated by
//! `cfg(debug_assertions)` at the call site.

pub struct DebugFlags {
    /// Emit per-file timings while loading CSV sources and snapshots.
    pub print_loading: bool,
    /// Emit one line per selection (series chosen, window bounds, row count).
    pub print_selection: bool,
    /// Emit engine control events and cache hits/misses.
    pub print_engine_events: bool,
    /// Emit detailed snapshot serialization/deserialization logs.
    pub print_serde: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_loading: false,
    print_selection: false,
    print_engine_events: false,
    print_serde: false,
};
