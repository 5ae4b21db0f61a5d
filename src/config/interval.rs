//! Human-friendly interval strings: `30s`, `5m`, `1h`, `1d`, or bare seconds.

use std::time::Duration;

/// Suffix, seconds per unit and unit name, largest first.
const UNITS: [(char, u64, &str); 4] = [
    ('d', 86_400, "days"),
    ('h', 3_600, "hours"),
    ('m', 60, "minutes"),
    ('s', 1, "seconds"),
];

/// Parse an interval string like "1h", "30m", "45s", "1d" or "300".
pub fn parse_interval(s: &str) -> Result<Duration, String> {
    let s = s.trim().to_lowercase();

    let unit = UNITS
        .iter()
        .find_map(|&(suffix, per, name)| s.strip_suffix(suffix).map(|n| (n, per, name)));

    let secs = match unit {
        Some((number, per, name)) => number
            .parse::<u64>()
            .ok()
            .and_then(|n| n.checked_mul(per))
            .ok_or_else(|| format!("Invalid {}: {}", name, number))?,
        None => s
            .parse::<u64>()
            .map_err(|_| format!("Invalid interval: {}. Use format like '30s', '5m', '1h'", s))?,
    };

    if secs == 0 {
        return Err("Interval must be greater than zero".to_string());
    }
    Ok(Duration::from_secs(secs))
}

/// Format an interval for display, using the largest whole unit.
pub fn format_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    let (suffix, per, _) = UNITS
        .iter()
        .copied()
        .find(|&(_, per, _)| secs >= per && secs.is_multiple_of(per))
        .unwrap_or(UNITS[3]);
    format!("{}{}", secs / per, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_interval("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_interval("1d").unwrap(), Duration::from_secs(86400));
        assert_eq!(parse_interval("45s").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_interval("240").unwrap(), Duration::from_secs(240));
        assert_eq!(parse_interval(" 4M ").unwrap(), Duration::from_secs(240));
    }

    #[test]
    fn test_parse_interval_rejects_garbage() {
        assert!(parse_interval("soon").is_err());
        assert!(parse_interval("m").is_err());
        assert!(parse_interval("-5m").is_err());
        assert!(parse_interval("").is_err());
        assert!(parse_interval("1.5h").is_err());
    }

    #[test]
    fn test_parse_interval_rejects_overflow() {
        let err = parse_interval(&format!("{}d", u64::MAX)).unwrap_err();
        assert!(err.starts_with("Invalid days"));
    }

    #[test]
    fn test_parse_interval_rejects_zero() {
        assert!(parse_interval("0").is_err());
        assert!(parse_interval("0m").is_err());
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(Duration::from_secs(3600)), "1h");
        assert_eq!(format_interval(Duration::from_secs(240)), "4m");
        assert_eq!(format_interval(Duration::from_secs(86400)), "1d");
        assert_eq!(format_interval(Duration::from_secs(90)), "90s");
        assert_eq!(format_interval(Duration::from_secs(7200)), "2h");
        assert_eq!(format_interval(Duration::ZERO), "0s");
    }
}
