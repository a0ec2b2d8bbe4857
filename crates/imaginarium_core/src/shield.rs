//! Exception shielding at the core boundary.
//!
//! # Responsibility
//! - Run a caller action and translate its failure into an `AppError`.
//! - Log the full internal detail of unexpected failures server-side.
//!
//! # Invariants
//! - Successful results pass through unchanged.
//! - An `AppError` returned by the action is logged at `warn` and returned
//!   as-is.
//! - Any other error, or a panic, is logged at `error` and replaced by
//!   `AppError::Internal(safe_message)`.
//! - No other component translates errors into the safe domain.
//! - While a guarded action runs, the logging panic hook records panics
//!   in the log only and leaves the terminal untouched.

use crate::error::{error_chain, AppError, AppResult};
use crate::logging::panic_payload_text;
use log::{error, warn};
use std::cell::Cell;
use std::error::Error;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Error type accepted from guarded actions.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

const DEFAULT_LOG_TARGET: &str = "imaginarium::shield";

thread_local! {
    static GUARD_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Returns whether the current thread is inside `ExceptionShield::guard`.
pub(crate) fn is_shielding() -> bool {
    GUARD_DEPTH.with(|depth| depth.get() > 0)
}

/// Marks the current thread as guarded until dropped.
struct GuardScope;

impl GuardScope {
    fn enter() -> Self {
        GUARD_DEPTH.with(|depth| depth.set(depth.get() + 1));
        GuardScope
    }
}

impl Drop for GuardScope {
    fn drop(&mut self) {
        GUARD_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Centralized error-translation guard.
#[derive(Debug, Clone, Copy)]
pub struct ExceptionShield {
    target: &'static str,
}

impl Default for ExceptionShield {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_TARGET)
    }
}

impl ExceptionShield {
    /// Creates a shield that logs under `target`.
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }

    /// Runs `action`, passing application failures through and replacing
    /// anything else with `safe_message`.
    pub fn guard<T, E, F>(&self, action: F, safe_message: &str) -> AppResult<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<BoxError>,
    {
        let outcome = {
            let _scope = GuardScope::enter();
            catch_unwind(AssertUnwindSafe(action))
        };
        let failure: BoxError = match outcome {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) => err.into(),
            Err(payload) => {
                error!(
                    target: self.target,
                    "event=guard module=shield status=error kind=panic detail={}",
                    panic_payload_text(&*payload)
                );
                return Err(AppError::Internal(safe_message.to_string()));
            }
        };

        match failure.downcast::<AppError>() {
            Ok(app_error) => {
                warn!(
                    target: self.target,
                    "event=guard module=shield status=app_error kind={} error={}",
                    app_error.kind(),
                    error_chain(&*app_error)
                );
                Err(*app_error)
            }
            Err(other) => {
                error!(
                    target: self.target,
                    "event=guard module=shield status=error kind=internal detail={} debug={:?}",
                    error_chain(&*other),
                    other
                );
                Err(AppError::Internal(safe_message.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_shielding, BoxError, ExceptionShield};
    use crate::error::{AppError, ValidationError};
    use std::io;

    #[test]
    fn success_passes_through() {
        let shield = ExceptionShield::default();
        let value = shield
            .guard(|| Ok::<_, AppError>(42), "unused")
            .expect("success should pass through");
        assert_eq!(value, 42);
    }

    #[test]
    fn io_error_is_replaced_by_safe_message() {
        let shield = ExceptionShield::default();
        let err = shield
            .guard(
                || -> Result<(), io::Error> {
                    Err(io::Error::new(io::ErrorKind::TimedOut, "DB timeout details"))
                },
                "Generic failure",
            )
            .unwrap_err();
        assert!(matches!(&err, AppError::Internal(message) if message == "Generic failure"));
        assert_eq!(err.to_string(), "Generic failure");
    }

    #[test]
    fn boxed_app_error_is_recognized() {
        let shield = ExceptionShield::default();
        let err = shield
            .guard(
                || -> Result<(), BoxError> { Err(Box::new(AppError::NotFound("id-9".into()))) },
                "unused",
            )
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(id) if id == "id-9"));
    }

    #[test]
    fn validation_error_passes_through_unchanged() {
        let shield = ExceptionShield::default();
        let err = shield
            .guard(
                || -> Result<(), AppError> { Err(ValidationError::EmptyAfterSanitize.into()) },
                "unused",
            )
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::EmptyAfterSanitize)
        ));
    }

    #[test]
    fn guarded_actions_are_marked_as_shielding() {
        let shield = ExceptionShield::default();
        assert!(!is_shielding());

        let inside = shield
            .guard(|| Ok::<_, AppError>(is_shielding()), "unused")
            .unwrap();
        assert!(inside);

        let nested = shield
            .guard(
                || shield.guard(|| Ok::<_, AppError>(is_shielding()), "unused"),
                "unused",
            )
            .unwrap();
        assert!(nested);

        let err = shield
            .guard(|| -> Result<(), AppError> { panic!("boom") }, "Shielded")
            .unwrap_err();
        assert_eq!(err.to_string(), "Shielded");
        assert!(!is_shielding());
    }
}
