//! Console commands standing in for the touch input source

use std::str::FromStr;

use crate::{
    input::{DragOutcome, InputArbiter, ToggleOutcome},
    readout::render_line,
};

/// One line of console input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Relative drag in scroll units
    Drag(f64),
    /// Absolute scroll position
    Scroll(f64),
    /// Select a duration directly, in seconds
    Set(f64),
    Toggle,
    Status,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Err("Empty command".to_string());
        };
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(format!("Too many arguments for '{}'", verb));
        }

        let number = |name: &str| -> Result<f64, String> {
            let raw = arg.ok_or_else(|| format!("'{}' needs a number", name))?;
            let value: f64 = raw
                .parse()
                .map_err(|e| format!("Invalid number '{}': {}", raw, e))?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(format!("Invalid number '{}'", raw))
            }
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "drag" | "d" => Command::Drag(number("drag")?),
            "scroll" => Command::Scroll(number("scroll")?),
            "set" => Command::Set(number("set")?),
            "toggle" | "t" => Command::Toggle,
            "status" | "s" => Command::Status,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("Unknown command '{}'", other)),
        };

        if arg.is_some() && matches!(command, Command::Toggle | Command::Status | Command::Quit) {
            return Err(format!("'{}' takes no arguments", verb));
        }
        Ok(command)
    }
}

/// Apply a command and describe the result for the user
pub fn execute(arbiter: &InputArbiter, command: Command) -> String {
    match command {
        Command::Drag(delta) => describe_drag(arbiter.on_drag(delta)),
        Command::Scroll(position) => describe_drag(arbiter.on_scroll_position(position)),
        Command::Set(seconds) => {
            let position = arbiter.policy().position_for_seconds(seconds);
            describe_drag(arbiter.on_scroll_position(position))
        }
        Command::Toggle => match arbiter.on_toggle() {
            ToggleOutcome::Started => "Started".to_string(),
            ToggleOutcome::Stopped => "Stopped".to_string(),
            ToggleOutcome::Ignored => "Nothing to start, drag to select a duration".to_string(),
        },
        Command::Status => render_line(&arbiter.snapshot()),
        Command::Quit => "Bye".to_string(),
    }
}

fn describe_drag(outcome: DragOutcome) -> String {
    match outcome {
        DragOutcome::Applied(seconds) => format!("Selected {:.3}s", seconds),
        DragOutcome::Ignored => "Countdown in progress, stop it to change the duration".to_string(),
    }
}

/// Help text printed at startup
pub const HELP: &str = "\
Commands:
  drag <units>     drag the gauge by a relative amount
  scroll <units>   scroll the gauge to an absolute position
  set <seconds>    select a duration directly
  toggle           press START/STOP
  status           print the current readout
  quit             exit";
