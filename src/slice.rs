//! Index normalization for strided reads.

use crate::error::{Result, SegChainError};

/// Resolves one slice bound the way sequence slicing does.
fn resolve(bound: Option<i128>, default: i128, len: i128, lower: i128, upper: i128) -> i128 {
    match bound {
        None => default,
        Some(index) => {
            let index = if index < 0 { index + len } else { index };
            index.clamp(lower, upper)
        }
    }
}

/// The forward byte span `[lo, hi)` a strided slice reads from, or `None`
/// if the slice selects nothing.
///
/// # Errors
///
/// `InvariantViolation` if `step` is zero.
pub(crate) fn forward_span(
    start: Option<i128>,
    stop: Option<i128>,
    step: i64,
    size: u64,
) -> Result<Option<(u64, u64)>> {
    if step == 0 {
        return Err(SegChainError::InvariantViolation {
            reason: "slice step must not be zero",
        });
    }
    let len = i128::from(size);
    let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };
    let (start_default, stop_default) = if step > 0 { (lower, upper) } else { (upper, lower) };
    let start = resolve(start, start_default, len, lower, upper);
    let stop = resolve(stop, stop_default, len, lower, upper);

    let (lo, hi) = if step > 0 { (start, stop) } else { (stop + 1, start + 1) };
    if lo >= hi {
        return Ok(None);
    }
    // Both bounds lie in 0..=size here.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(Some((lo as u64, hi as u64)))
}

/// Picks every `step`-th byte of `span`; a negative step walks backwards
/// from the last byte.
pub(crate) fn stride(span: &[u8], step: i64) -> Vec<u8> {
    let by = usize::try_from(step.unsigned_abs()).unwrap_or(usize::MAX);
    if step > 0 {
        span.iter().step_by(by).copied().collect()
    } else {
        span.iter().rev().step_by(by).copied().collect()
    }
}
