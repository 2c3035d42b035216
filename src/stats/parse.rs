/// Normalizes raw counter input to a non-negative integer.
///
/// Reads an optional sign followed by the leading run of digits, ignoring
/// whatever trails them (`"12abc"` is 12, `"3.9"` is 3). Empty, non-numeric
/// and negative input all become 0. Values past `u64::MAX` saturate.
pub fn parse_non_negative_int(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() || negative {
        return 0;
    }

    digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}
