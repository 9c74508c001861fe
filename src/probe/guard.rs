//! Failure isolation for individual checks.
//!
//! A check is a closure returning `Result<bool>`. Whatever it does (error,
//! panic or a plain `false`) is folded into a [`CheckOutcome`] so the next
//! check still runs.

use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::{self, AssertUnwindSafe};

use super::outcome::CheckOutcome;
use crate::error::Result;

/// Run `check` and capture its outcome. Never panics or propagates.
pub fn run_check<F>(name: &str, check: F) -> CheckOutcome
where
    F: FnOnce() -> Result<bool>,
{
    let outcome = match panic::catch_unwind(AssertUnwindSafe(check)) {
        Ok(Ok(true)) => CheckOutcome::pass(name),
        Ok(Ok(false)) => CheckOutcome::fail(name, None),
        Ok(Err(err)) => CheckOutcome::fail(name, Some(describe_error(&err))),
        Err(payload) => CheckOutcome::fail(name, Some(describe_panic(payload.as_ref()))),
    };

    if outcome.passed {
        tracing::info!(check = name, "{name} passed!");
    } else {
        let err = outcome.error.as_deref().unwrap_or("result mismatch");
        tracing::error!(check = name, "{name} FAILED! Error: {err}");
    }
    outcome
}

fn describe_error(err: &(dyn std::error::Error + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str("\n  caused by: ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    with_backtrace(text)
}

fn describe_panic(payload: &(dyn Any + Send)) -> String {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    };
    with_backtrace(format!("panicked: {message}"))
}

fn with_backtrace(text: String) -> String {
    format!("{text}\nbacktrace:\n{}", Backtrace::force_capture())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_pass_and_mismatch() {
        assert!(run_check("ok", || Ok(true)).passed);

        let outcome = run_check("mismatch", || Ok(false));
        assert!(!outcome.passed);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_error_is_captured() {
        let outcome = run_check("err", || {
            Err(Error::InvalidArgument {
                arg: "index",
                reason: "negative".into(),
            })
        });
        assert!(!outcome.passed);
        let text = outcome.error.unwrap();
        assert!(text.contains("negative"));
        assert!(text.contains("backtrace"));
    }

    #[test]
    fn test_panic_is_captured() {
        let outcome = run_check("panics", || -> Result<bool> { panic!("kernel exploded") });
        assert!(!outcome.passed);
        assert_eq!(outcome.name, "panics");
        assert!(outcome.error.unwrap().contains("kernel exploded"));
    }
}
