//! Console gateway: stdin lines in, rendered replies on stdout.
//!
//! This is the shipped chat surface. It needs no authentication token —
//! a networked platform gateway would own that credential, not the core.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

use super::{Gateway, GatewayError, Incoming};
use crate::render::Reply;

/// Sender name attached to every console message.
const CONSOLE_SENDER: &str = "console";

/// Gateway backed by the process's stdin and stdout.
pub struct ConsoleGateway {
    lines: Lines<BufReader<Stdin>>,
    stdout: Stdout,
}

impl ConsoleGateway {
    /// Creates a gateway over the process's standard streams.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            stdout: tokio::io::stdout(),
        }
    }
}

impl Default for ConsoleGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl Gateway for ConsoleGateway {
    async fn next_message(&mut self) -> Result<Option<Incoming>, GatewayError> {
        match self.lines.next_line().await? {
            Some(text) => Ok(Some(Incoming {
                sender: CONSOLE_SENDER.to_string(),
                text,
            })),
            // EOF: the console session ended.
            None => Ok(None),
        }
    }

    async fn send(&mut self, reply: Reply) -> Result<(), GatewayError> {
        self.stdout
            .write_all(format!("{reply}\n\n").as_bytes())
            .await?;
        self.stdout.flush().await?;
        Ok(())
    }
}
