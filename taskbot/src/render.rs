//! Reply formatting for bot responses.
//!
//! A [`Reply`] is the platform-neutral equivalent of a rich embed: a kind
//! (which a platform renderer can map onto a color), a title, a body, and
//! an optional footer. The `Display` impl renders the plain-text form
//! used by the console gateway.

use std::fmt;

/// Visual category of a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// A mutation succeeded (task added or completed).
    Success,
    /// Informational output (list, help).
    Info,
    /// A user-visible rejection.
    Error,
}

impl ReplyKind {
    /// Get the display symbol for this kind.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Info => "\u{2022}",
            Self::Error => "\u{2717}",
        }
    }
}

/// A formatted bot response, ready for a gateway to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Visual category.
    pub kind: ReplyKind,
    /// Short heading (e.g., "Task Added").
    pub title: String,
    /// Main content.
    pub body: String,
    /// Optional trailing note (e.g., "You now have 3 tasks").
    pub footer: Option<String>,
}

impl Reply {
    fn new(kind: ReplyKind, title: &str, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            body: body.into(),
            footer: None,
        }
    }

    fn with_footer(mut self, footer: String) -> Self {
        self.footer = Some(footer);
        self
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}\n{}", self.kind.symbol(), self.title, self.body)?;
        if let Some(footer) = &self.footer {
            write!(f, "\n({footer})")?;
        }
        Ok(())
    }
}

/// "task"/"tasks" depending on count.
const fn plural(count: usize) -> &'static str {
    if count == 1 { "task" } else { "tasks" }
}

/// Reply for a successfully added task.
#[must_use]
pub fn task_added(description: &str, total: usize) -> Reply {
    Reply::new(ReplyKind::Success, "Task Added", description).with_footer(format!(
        "You now have {total} {}",
        plural(total)
    ))
}

/// Reply showing the full task list, or a distinct message when empty.
#[must_use]
pub fn task_list(entries: &[(usize, String)]) -> Reply {
    if entries.is_empty() {
        return Reply::new(
            ReplyKind::Info,
            "Your To-Do List",
            "Your to-do list is empty!",
        );
    }
    let body = entries
        .iter()
        .map(|(position, description)| format!("{position}. {description}"))
        .collect::<Vec<_>>()
        .join("\n");
    let count = entries.len();
    Reply::new(
        ReplyKind::Info,
        &format!("Your To-Do List ({count} {})", plural(count)),
        body,
    )
}

/// Reply for a successfully completed task.
#[must_use]
pub fn task_completed(description: &str, remaining: usize) -> Reply {
    Reply::new(ReplyKind::Success, "Task Completed", description).with_footer(format!(
        "You have {remaining} {} remaining",
        plural(remaining)
    ))
}

/// Rejection for a `done` position outside the list.
#[must_use]
pub fn out_of_range() -> Reply {
    Reply::new(
        ReplyKind::Error,
        "Error",
        "Invalid task number. Use /list to see your tasks.",
    )
}

/// Rejection for a `done` argument that is not a positive integer.
#[must_use]
pub fn invalid_task_number(argument: &str) -> Reply {
    Reply::new(
        ReplyKind::Error,
        "Error",
        format!("`{argument}` is not a valid task number. Use /list to see your tasks."),
    )
}

/// Rejection for a command missing its required argument.
#[must_use]
pub fn missing_argument(command: &str) -> Reply {
    Reply::new(
        ReplyKind::Error,
        "Missing Argument",
        format!("The `/{command}` command needs an argument."),
    )
}

/// Rejection for an unrecognized command name.
#[must_use]
pub fn unknown_command(name: &str) -> Reply {
    Reply::new(
        ReplyKind::Error,
        "Command Not Found",
        format!("Unknown command `/{name}`. Use /help to see available commands."),
    )
}

/// Generic failure reply for errors with no more specific rendering.
#[must_use]
pub fn unexpected_error() -> Reply {
    Reply::new(
        ReplyKind::Error,
        "Unexpected Error",
        "An error occurred while processing your command.",
    )
}

/// The static help text listing every command.
#[must_use]
pub fn help() -> Reply {
    let body = "\
/add [task] — Add a new task to your list
/list — Show all your current tasks
/done [number] — Mark a task as completed
/help — Show this help message";
    Reply::new(ReplyKind::Info, "To-Do Bot Help", body)
}
