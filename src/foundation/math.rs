/// Clamp `v` to the symmetric range `[-half, half]`.
///
/// A negative `half` (content larger than its container) collapses the range to `0`.
pub(crate) fn clamp_symmetric(v: f64, half: f64) -> f64 {
    let half = half.max(0.0);
    v.clamp(-half, half)
}

pub(crate) fn finite_or(v: Option<f64>, default: f64) -> f64 {
    match v {
        Some(v) if v.is_finite() => v,
        _ => default,
    }
}

pub(crate) fn is_positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Parse the decimal digits embedded in an identifier into an ordinal.
///
/// `"zone-1712345"` yields `1712345`; identifiers without digits yield `0`.
/// Digits are concatenated in order, so `"a1b2"` yields `12`. Overflow saturates.
pub(crate) fn digits_ordinal(id: &str) -> u64 {
    id.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
