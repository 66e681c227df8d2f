//! Multiply service: the product of every integer-looking path segment.
//!
//! Segments that are not optionally-signed decimal integers are skipped.
//! There is no identity element: a path without any integer segment is a
//! client error, as is a product that does not fit in `i128`.

use crate::error::ServiceError;

/// True iff `segment` matches `^-?[0-9]+$`.
pub fn is_integer_segment(segment: &str) -> bool {
    let digits = segment.strip_prefix('-').unwrap_or(segment);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_zero(segment: &str) -> bool {
    segment.trim_start_matches('-').bytes().all(|b| b == b'0')
}

/// Integer segments in path order, parsed.
pub fn integer_operands<'a>(
    segments: &'a [&'a str],
) -> impl Iterator<Item = Result<i128, ServiceError>> + 'a {
    segments
        .iter()
        .filter(|s| is_integer_segment(s))
        .map(|s| s.parse::<i128>().map_err(|_| ServiceError::Overflow))
}

/// Product of the integer segments.
///
/// A zero factor makes the product zero, however large the other factors.
pub fn product(segments: &[&str]) -> Result<i128, ServiceError> {
    if segments.iter().any(|s| is_integer_segment(s) && is_zero(s)) {
        return Ok(0);
    }
    let mut operands = integer_operands(segments);
    let first = operands.next().ok_or(ServiceError::NoOperands)??;
    operands.try_fold(first, |acc, n| acc.checked_mul(n?).ok_or(ServiceError::Overflow))
}
