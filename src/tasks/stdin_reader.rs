//! Console input background task

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::{
    console::{execute, Command},
    input::InputArbiter,
};

/// Why the console input task returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEnd {
    /// The user asked to quit
    Quit,
    /// Input reached end of file; a running countdown is left alone
    Closed,
}

/// Read commands line by line and feed them to the arbiter. Returns on
/// `quit` or end of input; replies are printed to stdout.
pub async fn stdin_reader_task<R>(reader: R, arbiter: InputArbiter) -> anyhow::Result<InputEnd>
where
    R: AsyncBufRead + Unpin,
{
    info!("Starting console input task");

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                debug!("Console command: {:?}", command);
                println!("{}", execute(&arbiter, command));
                if command == Command::Quit {
                    return Ok(InputEnd::Quit);
                }
            }
            Err(e) => {
                warn!("Rejected console input {:?}: {}", line, e);
                println!("{}", e);
            }
        }
    }

    info!("Console input closed");
    Ok(InputEnd::Closed)
}
