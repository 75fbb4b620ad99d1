//! Line codec for the task storage format
//!
//! One task per line:
//!
//! ```text
//! [T][ ] <description>
//! [T][X] <description>
//! [D][ ] <description> (by: <when>)
//! [E][ ] <description> (from: <start> to: <end>)
//! ```
//!
//! `[X]` marks done, `[ ]` not done, immediately after the 3-character type
//! tag. Field text containing one of the keyword markers (`"(by: "`,
//! `"(from: "`, `" to: "`) is not representable unambiguously: decoding
//! splits at the first occurrence.

use thiserror::Error;

use crate::domain::{Task, TaskKind};

/// Why a storage line could not be decoded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("line too short")]
    Truncated,

    #[error("unrecognized type tag")]
    UnknownTag,

    #[error("malformed done flag")]
    BadDoneFlag,

    #[error("missing '{0}' marker")]
    MissingMarker(&'static str),

    #[error("missing closing parenthesis")]
    Unterminated,

    #[error("empty description")]
    EmptyDescription,
}

/// Encodes a task as its canonical storage line
///
/// Exact inverse of a well-formed [`decode`] for all three kinds.
pub fn encode(task: &Task) -> String {
    task.to_string()
}

/// Decodes one storage line into a task
pub fn decode(line: &str) -> Result<Task, DecodeError> {
    let tag = line.get(0..3).ok_or(DecodeError::Truncated)?;
    let done = match line.get(3..6).ok_or(DecodeError::Truncated)? {
        "[X]" => true,
        "[ ]" => false,
        _ => return Err(DecodeError::BadDoneFlag),
    };
    // Everything after the done flag; the separating space is absorbed by
    // trimming the individual fields.
    let body = line.get(6..).ok_or(DecodeError::Truncated)?.trim_end();

    match tag {
        "[T]" => {
            let description = require_text(body.trim())?;
            Ok(Task::restore(description, TaskKind::Todo, done))
        }
        "[D]" => decode_deadline(body, done),
        "[E]" => decode_event(body, done),
        _ => Err(DecodeError::UnknownTag),
    }
}

fn decode_deadline(body: &str, done: bool) -> Result<Task, DecodeError> {
    let open = body
        .find("(by: ")
        .ok_or(DecodeError::MissingMarker("(by: "))?;
    if !body.ends_with(')') {
        return Err(DecodeError::Unterminated);
    }

    let description = require_text(body[..open].trim())?;
    let by = body[open + "(by: ".len()..body.len() - 1].trim().to_string();

    Ok(Task::restore(description, TaskKind::Deadline { by }, done))
}

fn decode_event(body: &str, done: bool) -> Result<Task, DecodeError> {
    let open = body
        .find("(from: ")
        .ok_or(DecodeError::MissingMarker("(from: "))?;
    // The " to: " marker must come after "(from: "; finding it earlier in
    // the line is corruption, same as not finding it at all.
    let tail = &body[open + "(from: ".len()..];
    let to_pos = tail
        .find(" to: ")
        .ok_or(DecodeError::MissingMarker(" to: "))?;
    if !tail.ends_with(')') {
        return Err(DecodeError::Unterminated);
    }

    let description = require_text(body[..open].trim())?;
    let from = tail[..to_pos].trim().to_string();
    let to = tail[to_pos + " to: ".len()..tail.len() - 1].trim().to_string();

    Ok(Task::restore(description, TaskKind::Event { from, to }, done))
}

fn require_text(text: &str) -> Result<String, DecodeError> {
    if text.is_empty() {
        return Err(DecodeError::EmptyDescription);
    }
    Ok(text.to_string())
}
