//! Fatal-error reporting.
//!
//! Fallible GPU/runtime calls are routed through a [`FaultReporter`]. A failed
//! call becomes a [`Fault`] carrying its source location; the reporter asks a
//! [`FaultPrompt`] how to resolve it (abort, break, or ignore that call site
//! from now on). Suppressed call sites are remembered for the rest of the
//! process.

mod prompt;
mod reporter;

pub use prompt::{ConsolePrompt, FaultPolicy, FaultPolicyParseError, FaultPrompt, FixedPrompt};
pub use reporter::{CallSite, Fault, FaultReporter, Resolution};

/// Checks a `Result` against a [`FaultReporter`], recording the caller's
/// file, function and line.
///
/// Evaluates to `Some(value)` on success and `None` when the failure was
/// ignored (now or earlier at the same call site).
///
/// ```rust,ignore
/// let Some(()) = check!(faults, gpu.resize(size)) else { return };
/// ```
#[macro_export]
macro_rules! check {
    ($faults:expr, $result:expr $(,)?) => {
        $faults.check(
            $crate::fault::CallSite::new(file!(), $crate::function_name!(), line!()),
            $result,
        )
    };
}

/// Path of the enclosing function, e.g. `trianglebin::app::on_resize`.
/// Closure frames are folded into the function that defines them.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn here() {}
        fn name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let mut name = name_of(here);
        name = name.strip_suffix("::here").unwrap_or(name);
        while let Some(outer) = name.strip_suffix("::{{closure}}") {
            name = outer;
        }
        name
    }};
}
