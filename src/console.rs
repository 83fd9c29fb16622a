//! Prompt/response channel
//!
//! The dialogue engine talks to the user through the `Console` trait: a
//! line-oriented prompt/response channel with no formatting contract beyond
//! plain text. `StdConsole` is the stdin/stdout implementation; tests drive
//! the engine with a scripted double instead.

use crate::Result;
use std::io::{self, BufRead, Write};

/// Line-oriented prompt/response channel.
pub trait Console {
    /// Print a line to the user.
    fn say(&mut self, text: &str);

    /// Print a prompt and return the user's trimmed response line.
    fn prompt(&mut self, text: &str) -> Result<String>;
}

/// stdin/stdout console for interactive sessions.
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn say(&mut self, text: &str) {
        println!("{}", text);
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        print!("{} ", text);
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes = io::stdin().lock().read_line(&mut line)?;
        if bytes == 0 {
            return Err(crate::error::LendBotError::InputError(
                "input channel closed".to_string(),
            ));
        }

        Ok(line.trim().to_string())
    }
}

/// Scripted console for tests: answers come from a fixed queue, everything
/// said to the user is captured in a transcript.
#[cfg(test)]
pub struct ScriptedConsole {
    responses: std::collections::VecDeque<String>,
    pub transcript: Vec<String>,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: responses.iter().map(|s| s.to_string()).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn said(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn say(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        self.transcript.push(text.to_string());
        self.responses.pop_front().ok_or_else(|| {
            crate::error::LendBotError::InputError(format!(
                "script exhausted at prompt: {}",
                text
            ))
        })
    }
}
