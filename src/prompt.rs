//! Interactive console input for values not given on the command line.

use crate::error::BackupError;
use std::io::{BufRead, Write};

/// Photo count used when the answer is blank.
pub const DEFAULT_PHOTO_COUNT: u32 = 5;

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<String, BackupError> {
    write!(output, "{}", question)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Parses a photo count answer; blank means [`DEFAULT_PHOTO_COUNT`].
pub fn parse_count(answer: &str) -> Result<u32, BackupError> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(DEFAULT_PHOTO_COUNT);
    }
    match answer.parse::<u32>() {
        Ok(0) | Err(_) => Err(BackupError::InvalidInput(format!(
            "photo count must be a positive number, got '{}'",
            answer
        ))),
        Ok(count) => Ok(count),
    }
}

/// Asks for the VK user id. An empty answer is rejected.
pub fn prompt_user_id<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<String, BackupError> {
    let user_id = ask(input, output, "Enter VK user ID: ")?;
    if user_id.is_empty() {
        return Err(BackupError::InvalidInput("VK user ID is empty".to_string()));
    }
    Ok(user_id)
}

/// Asks for the number of photos; see [`parse_count`] for accepted answers.
pub fn prompt_count<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<u32, BackupError> {
    let answer = ask(
        input,
        output,
        &format!(
            "Number of photos to back up (default {}): ",
            DEFAULT_PHOTO_COUNT
        ),
    )?;
    parse_count(&answer)
}
