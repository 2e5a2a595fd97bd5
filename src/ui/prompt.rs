//! User prompts as plain functions of (prompt, constraints) -> answer.
//! The core never waits on input; commands ask through a `Prompter`.

use std::io::{self, BufRead, Write};

pub trait Prompter {
    /// Yes/no question; anything but an explicit yes is a no.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Ask for a positive number of hours. `None` when cancelled or invalid.
    fn ask_hours(&mut self, prompt: &str, current: f64) -> Option<f64>;
}

/// Interpret a yes/no answer.
pub fn parse_confirmation(answer: &str) -> bool {
    let ans = answer.trim().to_ascii_lowercase();
    ans == "y" || ans == "yes"
}

/// Interpret a goal answer; an empty answer keeps `current`.
pub fn parse_hours(answer: &str, current: f64) -> Option<f64> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Some(current);
    }
    answer
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite() && *h > 0.0)
}

/// Prompts on stdout, answers from any buffered reader (stdin by default).
pub struct TerminalPrompter<R: BufRead> {
    input: R,
}

impl TerminalPrompter<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> TerminalPrompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn read_answer(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        io::stdout().flush().ok();

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(answer),
        }
    }
}

impl<R: BufRead> Prompter for TerminalPrompter<R> {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.read_answer(&format!("{prompt} [y/N]: "))
            .map(|a| parse_confirmation(&a))
            .unwrap_or(false)
    }

    fn ask_hours(&mut self, prompt: &str, current: f64) -> Option<f64> {
        let answer = self.read_answer(&format!("{prompt} [{current}]: "))?;
        parse_hours(&answer, current)
    }
}
