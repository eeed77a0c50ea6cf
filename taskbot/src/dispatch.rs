//! The bot's dispatch loop: gateway line in, reply out.
//!
//! Every incoming line goes through [`handle_message`]: parse it, run the
//! matching task service operation, render the result. Malformed commands
//! become user-visible error replies, unprefixed chatter is skipped, and
//! nothing a user types can exit the loop — only gateway closure does.
//! Each handler runs in its own task, so even a panic is caught, logged,
//! and answered with the generic failure reply.

use std::sync::Arc;

use crate::commands::{self, Command, CommandError};
use crate::gateway::{Gateway, GatewayError, Incoming};
use crate::render::{self, Reply};
use crate::service::TaskService;

use taskbot_core::TaskError;

/// Runs the bot until the gateway closes.
///
/// # Errors
///
/// Returns [`GatewayError`] if the gateway fails while receiving or
/// sending; a clean close (`next_message` yielding `None`) is `Ok`.
pub async fn run<G: Gateway>(
    gateway: &mut G,
    service: Arc<TaskService>,
) -> Result<(), GatewayError> {
    while let Some(incoming) = gateway.next_message().await? {
        let handler_service = Arc::clone(&service);
        let handler =
            tokio::spawn(async move { handle_message(&handler_service, &incoming).await });
        if let Some(reply) = recover(handler.await) {
            gateway.send(reply).await?;
        }
    }
    tracing::info!("gateway closed");
    Ok(())
}

/// Maps a handler outcome onto the reply to deliver.
///
/// An unclassified failure inside a handler (a panic, surfaced as a
/// [`tokio::task::JoinError`]) must never take the serving process down:
/// it is logged and answered with the generic failure reply.
fn recover(outcome: Result<Option<Reply>, tokio::task::JoinError>) -> Option<Reply> {
    match outcome {
        Ok(reply) => reply,
        Err(err) => {
            tracing::error!(error = %err, "command handler failed");
            Some(render::unexpected_error())
        }
    }
}

/// Handles one incoming message, returning the reply to deliver.
///
/// Returns `None` for lines not addressed to the bot.
pub async fn handle_message(service: &TaskService, incoming: &Incoming) -> Option<Reply> {
    let command = match commands::parse(&incoming.text) {
        Ok(command) => command,
        Err(CommandError::NotACommand) => return None,
        Err(CommandError::Unknown(name)) => {
            tracing::debug!(sender = %incoming.sender, command = %name, "unknown command");
            return Some(render::unknown_command(&name));
        }
        Err(CommandError::MissingArgument(command)) => {
            tracing::debug!(sender = %incoming.sender, %command, "missing argument");
            return Some(render::missing_argument(command));
        }
        Err(CommandError::InvalidTaskNumber(text)) => {
            tracing::debug!(sender = %incoming.sender, argument = %text, "invalid task number");
            return Some(render::invalid_task_number(&text));
        }
    };
    Some(execute(service, command, &incoming.sender).await)
}

/// Runs a parsed command against the task service and renders the result.
async fn execute(service: &TaskService, command: Command, sender: &str) -> Reply {
    match command {
        Command::Add(description) => {
            let total = service.add(description.clone()).await;
            tracing::info!(%sender, task = %description, total, "task added");
            render::task_added(&description, total)
        }
        Command::List => {
            let entries = service.list().await;
            tracing::info!(%sender, count = entries.len(), "task list viewed");
            render::task_list(&entries)
        }
        Command::Done(position) => match service.complete(position).await {
            Ok((description, remaining)) => {
                tracing::info!(%sender, task = %description, remaining, "task completed");
                render::task_completed(&description, remaining)
            }
            Err(TaskError::OutOfRange { position, count }) => {
                tracing::warn!(%sender, position, count, "tried to complete invalid task number");
                render::out_of_range()
            }
        },
        Command::Help => {
            tracing::info!(%sender, "help viewed");
            render::help()
        }
    }
}
