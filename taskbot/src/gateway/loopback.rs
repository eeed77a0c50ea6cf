//! Loopback gateway for testing.
//!
//! Uses in-process [`tokio::sync::mpsc`] channels to script a conversation
//! with the bot. Created via [`LoopbackGateway::create_pair`], which returns
//! the gateway (handed to the dispatch loop) and a [`LoopbackHandle`] the
//! test drives: `say` feeds a message in, `reply` pulls the bot's answer
//! out, and dropping the handle closes the gateway.

use tokio::sync::mpsc;

use super::{Gateway, GatewayError, Incoming};
use crate::render::Reply;

/// In-process gateway backed by `tokio::sync::mpsc` channels.
pub struct LoopbackGateway {
    incoming_rx: mpsc::Receiver<Incoming>,
    reply_tx: mpsc::Sender<Reply>,
}

/// Test-side handle to a [`LoopbackGateway`].
pub struct LoopbackHandle {
    incoming_tx: mpsc::Sender<Incoming>,
    reply_rx: mpsc::Receiver<Reply>,
}

impl LoopbackGateway {
    /// Create a connected gateway/handle pair.
    ///
    /// The `buffer` parameter controls the channel capacity for each
    /// direction.
    #[must_use]
    pub fn create_pair(buffer: usize) -> (Self, LoopbackHandle) {
        let (incoming_tx, incoming_rx) = mpsc::channel(buffer);
        let (reply_tx, reply_rx) = mpsc::channel(buffer);
        (
            Self {
                incoming_rx,
                reply_tx,
            },
            LoopbackHandle {
                incoming_tx,
                reply_rx,
            },
        )
    }
}

impl Gateway for LoopbackGateway {
    async fn next_message(&mut self) -> Result<Option<Incoming>, GatewayError> {
        // None when the handle has been dropped: a clean close.
        Ok(self.incoming_rx.recv().await)
    }

    async fn send(&mut self, reply: Reply) -> Result<(), GatewayError> {
        self.reply_tx
            .send(reply)
            .await
            .map_err(|_| GatewayError::Closed)
    }
}

impl LoopbackHandle {
    /// Feed a message line into the gateway as the given sender.
    ///
    /// # Panics
    ///
    /// Panics if the gateway side has been dropped; tests treat that as a
    /// wiring bug.
    pub async fn say(&self, sender: &str, text: &str) {
        self.incoming_tx
            .send(Incoming {
                sender: sender.to_string(),
                text: text.to_string(),
            })
            .await
            .unwrap_or_else(|_| panic!("loopback gateway dropped"));
    }

    /// Pull the bot's next reply, or `None` if the gateway side is gone.
    pub async fn reply(&mut self) -> Option<Reply> {
        self.reply_rx.recv().await
    }
}
