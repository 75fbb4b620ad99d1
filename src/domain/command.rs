//! Command grammar and parsing
//!
//! One command per input line. `bye` and `list` match the whole trimmed line
//! case-insensitively; every other keyword is the first space-delimited
//! token, matched case-sensitively against the full token so that `unmark`
//! can never be read as `mark`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command")]
    UnknownCommand,

    #[error("The {command} command requires an argument")]
    MissingArgument { command: &'static str },

    #[error("Invalid format. Use: {usage}")]
    InvalidFormat { usage: &'static str },

    #[error("Expected a task number, got '{input}'")]
    InvalidIndex { input: String },
}

/// A structured, validated representation of one input line
///
/// Indices are 1-based, exactly as the user typed them; range checking is
/// the list engine's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    List,
    Mark(usize),
    Unmark(usize),
    Todo {
        description: String,
    },
    Deadline {
        description: String,
        by: String,
    },
    Event {
        description: String,
        from: String,
        to: String,
    },
    Delete(usize),
    Find {
        keyword: String,
    },
}

const DEADLINE_USAGE: &str = "deadline <description> /by <when>";
const EVENT_USAGE: &str = "event <description> /from <start> /to <end>";

/// Parses one input line into a command
///
/// Deterministic and total: every line either yields a command or exactly
/// one [`ParseError`].
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();

    if line.eq_ignore_ascii_case("bye") {
        return Ok(Command::Exit);
    }
    if line.eq_ignore_ascii_case("list") {
        return Ok(Command::List);
    }

    // The remainder stays untrimmed here: the `/by` and `/from` delimiters
    // carry their surrounding spaces, so trimming first would eat the space
    // in front of a delimiter at the start of the remainder.
    let (keyword, rest) = match line.split_once(' ') {
        Some((keyword, rest)) => (keyword, rest),
        None => (line, ""),
    };

    match keyword {
        "mark" => Ok(Command::Mark(parse_index(rest, "mark")?)),
        "unmark" => Ok(Command::Unmark(parse_index(rest, "unmark")?)),
        "delete" => Ok(Command::Delete(parse_index(rest, "delete")?)),
        "todo" => Ok(Command::Todo {
            description: require(rest, "todo")?,
        }),
        "deadline" => parse_deadline(rest),
        "event" => parse_event(rest),
        "find" => Ok(Command::Find {
            keyword: require(rest, "find")?,
        }),
        _ => Err(ParseError::UnknownCommand),
    }
}

/// Rejects an empty remainder before any task construction
fn require(rest: &str, command: &'static str) -> Result<String, ParseError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(ParseError::MissingArgument { command });
    }
    Ok(rest.to_string())
}

fn parse_index(rest: &str, command: &'static str) -> Result<usize, ParseError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(ParseError::MissingArgument { command });
    }
    rest.parse().map_err(|_| ParseError::InvalidIndex {
        input: rest.to_string(),
    })
}

fn parse_deadline(rest: &str) -> Result<Command, ParseError> {
    if rest.trim().is_empty() {
        return Err(ParseError::MissingArgument {
            command: "deadline",
        });
    }

    let parts: Vec<&str> = rest.split(" /by ").collect();
    let [description, by] = parts.as_slice() else {
        return Err(ParseError::InvalidFormat {
            usage: DEADLINE_USAGE,
        });
    };

    let description = description.trim();
    let by = by.trim();
    if description.is_empty() || by.is_empty() {
        return Err(ParseError::MissingArgument {
            command: "deadline",
        });
    }

    Ok(Command::Deadline {
        description: description.to_string(),
        by: by.to_string(),
    })
}

fn parse_event(rest: &str) -> Result<Command, ParseError> {
    if rest.trim().is_empty() {
        return Err(ParseError::MissingArgument { command: "event" });
    }

    // The two delimiters are sequential: description /from start /to end.
    let (description, tail) = rest.split_once(" /from ").ok_or(ParseError::InvalidFormat {
        usage: EVENT_USAGE,
    })?;
    let (from, to) = tail.split_once(" /to ").ok_or(ParseError::InvalidFormat {
        usage: EVENT_USAGE,
    })?;

    let description = description.trim();
    let from = from.trim();
    let to = to.trim();
    if description.is_empty() || from.is_empty() || to.is_empty() {
        return Err(ParseError::MissingArgument { command: "event" });
    }

    Ok(Command::Event {
        description: description.to_string(),
        from: from.to_string(),
        to: to.to_string(),
    })
}
