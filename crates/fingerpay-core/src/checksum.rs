//! Luhn checksum validation for card numbers

/// Shortest accepted card number
pub const MIN_CARD_DIGITS: usize = 12;

/// Longest accepted card number
pub const MAX_CARD_DIGITS: usize = 19;

/// Strip every character that is not an ASCII digit.
pub fn sanitize_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Check that `candidate` is 12-19 ASCII digits and passes the Luhn check.
///
/// Any other shape (letters, separators, wrong length) is rejected without
/// computing the checksum. Callers wanting lenient input should run
/// [`sanitize_digits`] first.
pub fn is_valid(candidate: &str) -> bool {
    let len = candidate.len();
    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&len)
        || !candidate.bytes().all(|b| b.is_ascii_digit())
    {
        return false;
    }

    let parity = len % 2;
    let sum: u32 = candidate
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == parity {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}
