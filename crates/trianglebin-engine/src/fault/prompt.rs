use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

use super::reporter::{Fault, Resolution};

/// Decides how a fault is resolved.
pub trait FaultPrompt: Send + Sync {
    fn resolve(&self, fault: &Fault) -> Resolution;
}

/// Always answers with the same resolution.
#[derive(Debug, Clone, Copy)]
pub struct FixedPrompt(pub Resolution);

impl FaultPrompt for FixedPrompt {
    fn resolve(&self, _fault: &Fault) -> Resolution {
        self.0
    }
}

/// Blocking prompt on the controlling terminal.
///
/// Prints the diagnostic to stderr and reads an answer from stdin. A closed
/// stdin aborts.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

impl FaultPrompt for ConsolePrompt {
    fn resolve(&self, fault: &Fault) -> Resolution {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut stderr = io::stderr();
        let _ = writeln!(stderr, "\n{fault}\n");

        loop {
            let _ = write!(stderr, "[a]bort, [b]reak, [i]gnore? ");
            let _ = stderr.flush();

            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) | Err(_) => return Resolution::Abort,
                Ok(_) => {
                    if let Some(resolution) = parse_answer(&line) {
                        return resolution;
                    }
                }
            }
        }
    }
}

fn parse_answer(line: &str) -> Option<Resolution> {
    match line.trim().to_ascii_lowercase().as_str() {
        "a" | "abort" => Some(Resolution::Abort),
        "b" | "break" => Some(Resolution::Break),
        "i" | "ignore" => Some(Resolution::Ignore),
        _ => None,
    }
}

/// Configured fault handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultPolicy {
    /// Ask on the terminal.
    #[default]
    Prompt,
    /// Abort on the first fault.
    Abort,
    /// Ignore every fault (each site is still reported once).
    Ignore,
}

impl FaultPolicy {
    pub fn into_prompt(self) -> Box<dyn FaultPrompt> {
        match self {
            FaultPolicy::Prompt => Box::new(ConsolePrompt),
            FaultPolicy::Abort => Box::new(FixedPrompt(Resolution::Abort)),
            FaultPolicy::Ignore => Box::new(FixedPrompt(Resolution::Ignore)),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown fault policy `{0}` (expected prompt, abort or ignore)")]
pub struct FaultPolicyParseError(pub String);

impl FromStr for FaultPolicy {
    type Err = FaultPolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prompt" => Ok(FaultPolicy::Prompt),
            "abort" => Ok(FaultPolicy::Abort),
            "ignore" => Ok(FaultPolicy::Ignore),
            other => Err(FaultPolicyParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::CallSite;

    #[test]
    fn answers_accept_short_and_long_forms() {
        assert_eq!(parse_answer("a\n"), Some(Resolution::Abort));
        assert_eq!(parse_answer(" Break "), Some(Resolution::Break));
        assert_eq!(parse_answer("IGNORE"), Some(Resolution::Ignore));
        assert_eq!(parse_answer("retry"), None);
        assert_eq!(parse_answer(""), None);
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Abort".parse::<FaultPolicy>(), Ok(FaultPolicy::Abort));
        assert_eq!(" ignore".parse::<FaultPolicy>(), Ok(FaultPolicy::Ignore));
        assert_eq!("prompt".parse::<FaultPolicy>(), Ok(FaultPolicy::Prompt));
        assert!("debug".parse::<FaultPolicy>().is_err());
    }

    #[test]
    fn fixed_policies_build_fixed_prompts() {
        let fault = Fault { site: CallSite::new("f.rs", "m::f", 1), message: String::new() };
        assert_eq!(FaultPolicy::Abort.into_prompt().resolve(&fault), Resolution::Abort);
        assert_eq!(FaultPolicy::Ignore.into_prompt().resolve(&fault), Resolution::Ignore);
    }
}
