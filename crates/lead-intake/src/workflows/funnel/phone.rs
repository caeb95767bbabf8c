/// Render raw phone input as a US display number while the visitor types.
///
/// Non-digits are dropped and a leading country code `1` is stripped once more than ten
/// digits are present. A `+1` prefix from an earlier pass is ignored so feeding the
/// displayed value back in is stable. At most ten national digits are kept. This is
/// display formatting only; the result is never checked for being a dialable number.
pub fn format_phone(raw: &str) -> String {
    let trimmed = raw.trim_start();
    let body = trimmed.strip_prefix("+1").unwrap_or(trimmed);
    let digits: String = body.chars().filter(char::is_ascii_digit).collect();
    let national = if digits.starts_with('1') && digits.len() > 10 {
        &digits[1..]
    } else {
        digits.as_str()
    };

    match national.len() {
        0 => String::new(),
        1..=3 => format!("+1 ({national}"),
        4..=6 => format!("+1 ({}) {}", &national[..3], &national[3..]),
        len => format!(
            "+1 ({}) {}-{}",
            &national[..3],
            &national[3..6],
            &national[6..len.min(10)]
        ),
    }
}
