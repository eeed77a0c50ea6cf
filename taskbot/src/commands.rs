//! Parsing of incoming chat lines into bot commands.
//!
//! Commands are prefixed with `/` or `!` (the platform's slash commands
//! and the classic text prefix are both accepted). A line carrying
//! neither prefix is not addressed to the bot and is skipped by the
//! dispatcher.

use thiserror::Error;

/// Prefixes that mark a line as a bot command.
pub const COMMAND_PREFIXES: [char; 2] = ['/', '!'];

/// A parsed bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a task with the given description.
    Add(String),
    /// Show the current task list.
    List,
    /// Complete (remove) the task at the given 1-indexed position.
    Done(usize),
    /// Show the help text.
    Help,
}

/// Errors that can occur while parsing a command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The line carries no command prefix and is not addressed to the bot.
    #[error("not a command")]
    NotACommand,

    /// The command name is not one the bot knows.
    #[error("unknown command: {0}")]
    Unknown(String),

    /// A command that requires an argument was given none.
    #[error("the `{0}` command needs an argument")]
    MissingArgument(&'static str),

    /// The `done` argument was not a positive integer.
    #[error("`{0}` is not a valid task number")]
    InvalidTaskNumber(String),
}

/// Parses a single incoming line into a [`Command`].
///
/// The `add` argument is everything after the command word, taken
/// verbatim apart from surrounding whitespace. The `done` argument must
/// parse as a positive integer; range checking against the list happens
/// in the task store, not here.
///
/// # Errors
///
/// Returns [`CommandError::NotACommand`] for unprefixed lines,
/// [`CommandError::Unknown`] for unrecognized command names, and
/// [`CommandError::MissingArgument`] / [`CommandError::InvalidTaskNumber`]
/// for malformed arguments.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let Some(rest) = COMMAND_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(*prefix))
    else {
        return Err(CommandError::NotACommand);
    };

    let (name, args) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(name, args)| (name, args.trim()));

    match name {
        "add" => {
            if args.is_empty() {
                Err(CommandError::MissingArgument("add"))
            } else {
                Ok(Command::Add(args.to_string()))
            }
        }
        "list" => Ok(Command::List),
        "done" => {
            if args.is_empty() {
                Err(CommandError::MissingArgument("done"))
            } else {
                args.parse::<usize>()
                    .map(Command::Done)
                    .map_err(|_| CommandError::InvalidTaskNumber(args.to_string()))
            }
        }
        "help" => Ok(Command::Help),
        // A bare prefix with nothing after it is not a command either.
        "" => Err(CommandError::NotACommand),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
