use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Parse a polling interval like "30s", "5m" or "1h".
///
/// Anything below one second (including zero and negative values) is rejected
/// outright; the floor keeps a mistyped interval from hammering feed hosts.
pub fn parse_interval(raw: &str) -> Result<Duration> {
    let s = raw.trim();
    let Some(unit) = s.chars().last() else {
        bail!("empty interval; expected <number><s|m|h>, e.g. \"30s\"");
    };
    let seconds_per_unit: i64 = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        _ => bail!("bad interval {:?}: expected <number><s|m|h>, e.g. \"30s\"", raw),
    };
    let number = &s[..s.len() - unit.len_utf8()];
    let n: i64 = number
        .parse()
        .with_context(|| format!("bad interval {:?}: {:?} is not a number", raw, number))?;
    let secs = n
        .checked_mul(seconds_per_unit)
        .with_context(|| format!("interval {:?} overflows", raw))?;
    if secs < 1 {
        bail!("interval must be at least 1s (got {:?})", raw);
    }
    Ok(Duration::from_secs(secs as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_forms() {
        assert_eq!(parse_interval("1s").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_interval("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_interval("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_interval("2h").unwrap(), Duration::from_secs(7200));
    }

    #[test]
    fn rejects_below_one_second() {
        assert!(parse_interval("0s").is_err());
        assert!(parse_interval("0m").is_err());
        assert!(parse_interval("-5s").is_err());
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(parse_interval("").is_err());
        assert!(parse_interval("10").is_err());
        assert!(parse_interval("500ms").is_err());
        assert!(parse_interval("fast").is_err());
        assert!(parse_interval("1d").is_err());
    }
}
