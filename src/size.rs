use crate::error::{Result, SegChainError};

const SUFFIXES: [(char, u64); 4] = [
    ('k', 1024),
    ('M', 1024 * 1024),
    ('G', 1024 * 1024 * 1024),
    ('T', 1024 * 1024 * 1024 * 1024),
];

/// Parses a byte count such as `"4096"`, `"10G"` or `"1.5k"`.
///
/// Suffixes are binary: `k` = 1024, `M` = 1024², `G` = 1024³, `T` = 1024⁴.
/// A fractional mantissa is allowed with a suffix; the result is truncated
/// toward zero.
///
/// # Errors
///
/// Returns `SegChainError::InvalidSize` for an unknown suffix, a malformed or
/// negative number, or a result beyond `u64::MAX`.
pub fn parse_size(input: &str) -> Result<u64> {
    let invalid = || SegChainError::InvalidSize {
        input: input.to_string(),
    };
    let trimmed = input.trim();
    if let Ok(bytes) = trimmed.parse::<u64>() {
        return Ok(bytes);
    }

    let suffix = trimmed.chars().last().ok_or_else(invalid)?;
    let multiplier = SUFFIXES
        .iter()
        .find(|(c, _)| *c == suffix)
        .map(|(_, m)| *m)
        .ok_or_else(invalid)?;
    let mantissa = &trimmed[..trimmed.len() - suffix.len_utf8()];

    if let Ok(whole) = mantissa.parse::<u64>() {
        return whole.checked_mul(multiplier).ok_or_else(invalid);
    }

    let value: f64 = mantissa.parse().map_err(|_| invalid())?;
    #[allow(clippy::cast_precision_loss)]
    let bytes = value * multiplier as f64;
    if !bytes.is_finite() || bytes < 0.0 || bytes >= u64::MAX as f64 {
        return Err(invalid());
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(bytes as u64)
}
