//! Interactive line-based front end.
//!
//! Stands in for the GUI: the operator presses Enter to fire GO and types
//! `set <ip> <port>` to retarget.  Every command goes through the same
//! bridge functions a graphical front end would call.

use std::io::{self, BufRead, Write};

use serde::Serialize;
use tracing::debug;

use super::{get_endpoint, send_go, update_endpoint, CommandResult};
use crate::application::session::SessionController;

/// Shown for `help` and after an unrecognised command.
pub const HELP: &str = "\
commands:
  go | <enter>        send GO
  set <ip> <port>     change the console endpoint
  show                print the current endpoint
  help                show this text
  quit | exit         leave";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Go,
    Set { ip: String, port: String },
    Show,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parses one input line.  An empty line means GO.
    ///
    /// # Errors
    ///
    /// Returns a hint for the operator if the line is not a command.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Self::Go);
        };
        let rest: Vec<&str> = words.collect();

        match (verb.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("go", []) => Ok(Self::Go),
            ("set", [ip, port]) => Ok(Self::Set {
                ip: (*ip).to_string(),
                port: (*port).to_string(),
            }),
            ("set", _) => Err("usage: set <ip> <port>".to_string()),
            ("show", []) => Ok(Self::Show),
            ("help", _) | ("?", _) => Ok(Self::Help),
            ("quit", []) | ("exit", []) => Ok(Self::Quit),
            _ => Err(format!("unknown command {line:?}, type `help`")),
        }
    }
}

fn write_result<T: Serialize, W: Write>(out: &mut W, result: &CommandResult<T>) -> io::Result<()> {
    if result.success {
        writeln!(out, "{}", result.message)
    } else {
        writeln!(out, "error: {}", result.message)
    }
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Lines that are not valid UTF-8 are decoded lossily and end up as an
/// unknown command; they do not end the session.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn run_console<R: BufRead, W: Write>(
    controller: &SessionController,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    write_result(&mut output, &get_endpoint(controller))?;
    writeln!(output, "press Enter to send GO, `help` for commands")?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        debug!("console input: {line:?}");
        match ConsoleCommand::parse(line) {
            Ok(ConsoleCommand::Go) => write_result(&mut output, &send_go(controller))?,
            Ok(ConsoleCommand::Set { ip, port }) => {
                write_result(&mut output, &update_endpoint(controller, &ip, &port))?
            }
            Ok(ConsoleCommand::Show) => write_result(&mut output, &get_endpoint(controller))?,
            Ok(ConsoleCommand::Help) => writeln!(output, "{HELP}")?,
            Ok(ConsoleCommand::Quit) => break,
            Err(hint) => writeln!(output, "{hint}")?,
        }
        output.flush()?;
    }
    Ok(())
}
