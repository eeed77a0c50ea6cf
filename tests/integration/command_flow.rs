//! End-to-end command flow tests through the loopback gateway.
//!
//! Scripts a conversation against the full stack — dispatch loop, command
//! parsing, task service, and real on-disk persistence in a temp dir —
//! and checks the replies the bot hands back.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use taskbot::dispatch;
use taskbot::gateway::loopback::{LoopbackGateway, LoopbackHandle};
use taskbot::render::{Reply, ReplyKind};
use taskbot::service::TaskService;
use taskbot_core::TaskFile;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Spins up a bot over a loopback gateway, persisting into `dir`.
fn start_bot(dir: &std::path::Path) -> (LoopbackHandle, tokio::task::JoinHandle<()>) {
    let file = TaskFile::new(dir.join("todo.json"), dir.join("backups")).unwrap();
    let service = Arc::new(TaskService::new(file));
    let (mut gateway, handle) = LoopbackGateway::create_pair(32);

    let bot = tokio::spawn(async move {
        dispatch::run(&mut gateway, service).await.unwrap();
    });

    (handle, bot)
}

/// Sends a line as "alice" and returns the bot's reply.
async fn ask(handle: &mut LoopbackHandle, line: &str) -> Reply {
    handle.say("alice", line).await;
    handle.reply().await.expect("bot should reply")
}

// ---------------------------------------------------------------------------
// Scenario tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_add_list_done_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let (mut handle, bot) = start_bot(dir.path());

    // Empty list greets with the distinct empty message.
    let reply = ask(&mut handle, "/list").await;
    assert_eq!(reply.body, "Your to-do list is empty!");

    let reply = ask(&mut handle, "/add buy milk").await;
    assert_eq!(reply.kind, ReplyKind::Success);
    assert_eq!(reply.footer.as_deref(), Some("You now have 1 task"));

    let reply = ask(&mut handle, "/list").await;
    assert_eq!(reply.body, "1. buy milk");

    let reply = ask(&mut handle, "/add walk dog").await;
    assert_eq!(reply.footer.as_deref(), Some("You now have 2 tasks"));

    let reply = ask(&mut handle, "/list").await;
    assert_eq!(reply.body, "1. buy milk\n2. walk dog");

    let reply = ask(&mut handle, "/done 1").await;
    assert_eq!(reply.kind, ReplyKind::Success);
    assert_eq!(reply.body, "buy milk");
    assert_eq!(reply.footer.as_deref(), Some("You have 1 task remaining"));

    let reply = ask(&mut handle, "/list").await;
    assert_eq!(reply.body, "1. walk dog");

    // Out-of-range completion is rejected and the list is unchanged.
    let reply = ask(&mut handle, "/done 5").await;
    assert_eq!(reply.kind, ReplyKind::Error);
    let reply = ask(&mut handle, "/list").await;
    assert_eq!(reply.body, "1. walk dog");

    drop(handle);
    bot.await.unwrap();
}

#[tokio::test]
async fn bang_prefix_works_like_slash() {
    let dir = tempfile::tempdir().unwrap();
    let (mut handle, bot) = start_bot(dir.path());

    let reply = ask(&mut handle, "!add feed cat").await;
    assert_eq!(reply.kind, ReplyKind::Success);
    let reply = ask(&mut handle, "!list").await;
    assert_eq!(reply.body, "1. feed cat");

    drop(handle);
    bot.await.unwrap();
}

#[tokio::test]
async fn help_lists_all_commands() {
    let dir = tempfile::tempdir().unwrap();
    let (mut handle, bot) = start_bot(dir.path());

    let reply = ask(&mut handle, "/help").await;
    assert_eq!(reply.kind, ReplyKind::Info);
    assert_eq!(reply.title, "To-Do Bot Help");
    for command in ["/add", "/list", "/done", "/help"] {
        assert!(reply.body.contains(command), "help is missing {command}");
    }

    drop(handle);
    bot.await.unwrap();
}

#[tokio::test]
async fn malformed_commands_get_error_replies_not_crashes() {
    let dir = tempfile::tempdir().unwrap();
    let (mut handle, bot) = start_bot(dir.path());

    let reply = ask(&mut handle, "/add").await;
    assert_eq!(reply.title, "Missing Argument");

    let reply = ask(&mut handle, "/done soon").await;
    assert_eq!(reply.kind, ReplyKind::Error);

    let reply = ask(&mut handle, "/frobnicate").await;
    assert_eq!(reply.title, "Command Not Found");

    // The loop is still alive and serving.
    let reply = ask(&mut handle, "/list").await;
    assert_eq!(reply.body, "Your to-do list is empty!");

    drop(handle);
    bot.await.unwrap();
}

#[tokio::test]
async fn plain_chatter_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let (mut handle, bot) = start_bot(dir.path());

    handle.say("alice", "good morning everyone").await;
    // No reply for chatter; the next command's reply is the first one seen.
    let reply = ask(&mut handle, "/list").await;
    assert_eq!(reply.body, "Your to-do list is empty!");

    drop(handle);
    bot.await.unwrap();
}

#[tokio::test]
async fn commands_persist_across_bot_restarts() {
    let dir = tempfile::tempdir().unwrap();

    {
        let (mut handle, bot) = start_bot(dir.path());
        ask(&mut handle, "/add remember me").await;
        drop(handle);
        bot.await.unwrap();
    }

    let (mut handle, bot) = start_bot(dir.path());
    let reply = ask(&mut handle, "/list").await;
    assert_eq!(reply.body, "1. remember me");

    drop(handle);
    bot.await.unwrap();
}
