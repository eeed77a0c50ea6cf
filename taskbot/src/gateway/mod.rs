//! Chat gateway abstraction.
//!
//! Defines the [`Gateway`] trait that connects the bot to a chat surface.
//! Concrete implementations include:
//! - [`console::ConsoleGateway`] — stdin/stdout, the shipped collaborator
//! - [`loopback::LoopbackGateway`] — in-process channels for testing
//!
//! The gateway is the boundary where platform specifics live: it delivers
//! raw message lines inward and carries formatted [`Reply`] values back
//! out. The task store and persistence never see the platform.

pub mod console;
pub mod loopback;

use crate::render::Reply;

/// A message arriving from the chat surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incoming {
    /// Display name of whoever sent the message.
    pub sender: String,
    /// The raw message text, one line.
    pub text: String,
}

/// Errors that can occur during gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The gateway connection has been closed.
    #[error("gateway closed")]
    Closed,

    /// An underlying I/O error occurred.
    #[error("gateway I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Async gateway trait for receiving messages and delivering replies.
pub trait Gateway: Send {
    /// Receive the next incoming message.
    ///
    /// Resolves to `Ok(None)` when the gateway has closed cleanly and no
    /// further messages will arrive.
    fn next_message(
        &mut self,
    ) -> impl std::future::Future<Output = Result<Option<Incoming>, GatewayError>> + Send;

    /// Deliver a reply to the chat surface.
    fn send(
        &mut self,
        reply: Reply,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;
}
