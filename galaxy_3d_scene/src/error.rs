//! Error types for the Galaxy3D scene core
//!
//! Evaluation paths (sampling, matrix rebuilds, culling) never fail.
//! Errors only surface when constructing objects from caller-provided
//! data that violates a precondition (empty or unsorted keyframes, ...).

use std::fmt;

/// Result type for Galaxy3D scene operations
pub type Galaxy3dResult<T> = Result<T, Galaxy3dError>;

/// Galaxy3D scene errors
#[derive(Debug, Clone, PartialEq)]
pub enum Galaxy3dError {
    /// Keyframe data rejected at construction (empty, mismatched, unsorted)
    InvalidKeyframes(String),

    /// A descriptor or argument is outside its valid domain
    InvalidParameter(String),
}

impl fmt::Display for Galaxy3dError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Galaxy3dError::InvalidKeyframes(msg) => write!(f, "Invalid keyframes: {}", msg),
            Galaxy3dError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for Galaxy3dError {}

/// Build a [`Galaxy3dError`], logging it at ERROR severity with file:line.
///
/// The variant defaults to `InvalidParameter`; prefix the message with
/// `Variant =>` to pick another one.
///
/// ```ignore
/// return Err(engine_err!("galaxy3d::Sampler", InvalidKeyframes => "{} times, {} values", a, b));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident => $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::error::Galaxy3dError::$variant(message)
    }};
    ($source:expr, $($arg:tt)*) => {
        $crate::engine_err!($source, InvalidParameter => $($arg)*)
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
