use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Converts a number used as an array or string index into a `usize`.
///
/// The value must be finite, non-negative, integral and no larger than
/// [`MAX_SAFE_U64_INT`].
///
/// ## Errors
/// Returns `RuntimeError::InvalidIndex` for any other value.
///
/// ## Example
/// ```
/// use tessera::{error::RuntimeError, util::num::f64_to_index};
///
/// assert_eq!(f64_to_index(3.0, 1).unwrap(), 3);
///
/// let err = f64_to_index(1.5, 7).unwrap_err();
/// assert!(matches!(err, RuntimeError::InvalidIndex { line: 7, .. }));
///
/// assert!(f64_to_index(-1.0, 1).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_index(value: f64, line: usize) -> EvalResult<usize> {
    if !value.is_finite()
       || value < 0.0
       || value > MAX_SAFE_U64_INT as f64
       || value.fract() != 0.0
    {
        return Err(RuntimeError::InvalidIndex { index: value.to_string(),
                                                line });
    }
    usize::try_from(value as u64).map_err(|_| RuntimeError::InvalidIndex { index: value.to_string(),
                                                                          line })
}

/// Converts a length or count into a language number.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds [`MAX_SAFE_U64_INT`] and would
/// lose precision.
///
/// ## Example
/// ```
/// use tessera::util::num::{MAX_SAFE_U64_INT, usize_to_f64_checked};
///
/// assert_eq!(usize_to_f64_checked(100, "too big").unwrap(), 100.0);
///
/// let too_big = (MAX_SAFE_U64_INT + 1) as usize;
/// assert!(usize_to_f64_checked(too_big, "too big").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked<E>(value: usize, error: E) -> Result<f64, E> {
    match u64::try_from(value) {
        Ok(value) if value <= MAX_SAFE_U64_INT => Ok(value as f64),
        _ => Err(error),
    }
}
