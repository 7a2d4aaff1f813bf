//! Line-driven control loop: each command is one control change.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::engine::{ControlEvent, DashboardEngine};
use crate::ui::ui_render::render_view;

const PREVIEW_ROWS: usize = 6;

const HELP: &str = "\
Commands:
  symbol <SYMBOL>   switch stock (e.g. symbol NVDA)
  window <0-6>      0=1 day 1=1 week 2=1 month 3=3 months 4=1 year 5=5 years 6=max
  field <NAME>      open | high | low | close
  show              redraw the current view
  help              this text
  quit              leave
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Control(ControlEvent),
    Show,
    Help,
    Quit,
}

/// Parse one input line. `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match (verb.to_ascii_lowercase().as_str(), arg) {
        ("symbol", Some(s)) => Command::Control(ControlEvent::SymbolChanged(s.to_ascii_uppercase())),
        ("window", Some(n)) => match n.parse::<i64>() {
            Ok(index) => Command::Control(ControlEvent::WindowChanged(index)),
            Err(_) => return Err(format!("window expects a number, got '{}'", n)),
        },
        ("field", Some(f)) => Command::Control(ControlEvent::FieldChanged(f.to_string())),
        ("show", None) => Command::Show,
        ("help", None) => Command::Help,
        ("quit" | "exit", None) => Command::Quit,
        ("symbol" | "window" | "field", None) => {
            return Err(format!("'{}' needs a value", verb));
        }
        _ => return Err(format!("unknown command '{}' (try 'help')", line.trim())),
    };
    Ok(Some(command))
}

/// Run until `quit` or end of input, redrawing after every control change.
pub fn run_interactive<R: BufRead, W: Write>(
    engine: &mut DashboardEngine,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "{}", crate::config::DASHBOARD.title)?;
    render_view(&mut output, engine, PREVIEW_ROWS)?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        match parse_command(&line?) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => write!(output, "{}", HELP)?,
            Ok(Some(Command::Show)) => render_view(&mut output, engine, PREVIEW_ROWS)?,
            Ok(Some(Command::Control(event))) => {
                let before = engine.view().generation;
                engine.handle(event);
                if engine.view().generation != before {
                    render_view(&mut output, engine, PREVIEW_ROWS)?;
                }
            }
            Err(msg) => writeln!(output, "? {}", msg)?,
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}
