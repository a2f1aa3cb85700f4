use std::collections::HashSet;
use std::fmt;
use std::sync::Mutex;

use super::prompt::FaultPrompt;

/// Source location of a checked call: file, enclosing function path and line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    pub file: &'static str,
    pub function: &'static str,
    pub line: u32,
}

impl CallSite {
    pub const fn new(file: &'static str, function: &'static str, line: u32) -> Self {
        Self { file, function, line }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.file, self.line, self.function)
    }
}

/// A failed call awaiting resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub site: CallSite,
    pub message: String,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "File: {}\nLine: {}\nFunction: {}\n\n{}", self.site.file, self.site.line, self.site.function, self.message)
    }
}

/// How a fault is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Terminate the process with a non-zero status.
    Abort,
    /// Stop in the debugger (panics with the diagnostic).
    Break,
    /// Continue, and never report this call site again.
    Ignore,
}

/// Process-wide fault service.
///
/// Shared as `Arc<FaultReporter>`; the suppressed set is guarded internally.
pub struct FaultReporter {
    prompt: Box<dyn FaultPrompt>,
    suppressed: Mutex<HashSet<CallSite>>,
}

impl FaultReporter {
    pub fn new(prompt: Box<dyn FaultPrompt>) -> Self {
        Self {
            prompt,
            suppressed: Mutex::new(HashSet::new()),
        }
    }

    /// Checks `result`, resolving a failure through the prompt.
    ///
    /// Returns `None` for ignored failures. `Abort` exits the process and
    /// `Break` panics, so neither returns.
    pub fn check<T, E: fmt::Display>(&self, site: CallSite, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                let fault = Fault { site, message: err.to_string() };
                match self.report(&fault) {
                    Resolution::Ignore => None,
                    Resolution::Abort => {
                        log::error!("aborting after fault at {}", fault.site);
                        std::process::exit(1);
                    }
                    Resolution::Break => panic!("fault at {}: {}", fault.site, fault.message),
                }
            }
        }
    }

    /// Resolves `fault` without acting on the resolution.
    ///
    /// Already-suppressed sites resolve to `Ignore` without prompting. An
    /// `Ignore` answer suppresses the site.
    pub fn report(&self, fault: &Fault) -> Resolution {
        if self.is_suppressed(&fault.site) {
            log::debug!("suppressed fault at {}: {}", fault.site, fault.message);
            return Resolution::Ignore;
        }

        log::error!("fault at {}: {}", fault.site, fault.message);
        let resolution = self.prompt.resolve(fault);
        if resolution == Resolution::Ignore {
            self.lock_suppressed().insert(fault.site);
        }
        resolution
    }

    pub fn is_suppressed(&self, site: &CallSite) -> bool {
        self.lock_suppressed().contains(site)
    }

    pub fn suppressed_count(&self) -> usize {
        self.lock_suppressed().len()
    }

    fn lock_suppressed(&self) -> std::sync::MutexGuard<'_, HashSet<CallSite>> {
        // A panic while holding the lock leaves the set intact.
        self.suppressed.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for FaultReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultReporter")
            .field("suppressed", &self.suppressed_count())
            .finish_non_exhaustive()
    }
}
