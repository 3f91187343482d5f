/// Parse a mute duration given as a positive whole number of seconds.
///
/// The duration argument is intentionally strict: no unit suffixes, no
/// signs, no fractions. Anything else is reported back to the caller and
/// never schedules an un-mute.
pub fn parse_mute_seconds(raw: &str) -> Option<u64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    value.parse::<u64>().ok().filter(|seconds| *seconds > 0)
}

#[cfg(test)]
mod tests {
    use super::parse_mute_seconds;

    #[test]
    fn accepts_plain_positive_seconds() {
        assert_eq!(parse_mute_seconds("10"), Some(10));
        assert_eq!(parse_mute_seconds("  300  "), Some(300));
        assert_eq!(parse_mute_seconds("86400"), Some(86_400));
    }

    #[test]
    fn rejects_everything_else() {
        assert_eq!(parse_mute_seconds("abc"), None);
        assert_eq!(parse_mute_seconds("10m"), None);
        assert_eq!(parse_mute_seconds("-5"), None);
        assert_eq!(parse_mute_seconds("+5"), None);
        assert_eq!(parse_mute_seconds("1.5"), None);
        assert_eq!(parse_mute_seconds("0"), None);
        assert_eq!(parse_mute_seconds(""), None);
        assert_eq!(parse_mute_seconds("   "), None);
    }
}
