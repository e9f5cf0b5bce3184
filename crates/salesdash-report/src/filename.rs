//! Export file names.

use chrono::{DateTime, Utc};

/// Location segment used when the dashboard is not scoped to one.
pub const ALL_REGIONS: &str = "All-Regions";

/// Replace every non-alphanumeric ASCII character with `-` and cut to
/// `max_len` characters.
pub fn sanitize_context(context: &str, max_len: usize) -> String {
    context
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .take(max_len)
        .collect()
}

/// Minute-precision UTC timestamp, `2024-03-04_14-05`.
pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d_%H-%M").to_string()
}

pub fn suggestions_filename(context: &str, max_len: usize, at: &DateTime<Utc>) -> String {
    format!(
        "Sales-Suggestions-{}-{}.pdf",
        sanitize_context(context, max_len),
        timestamp(at)
    )
}

/// The search term, when present, is embedded as `_Search-<term>`.
pub fn transcript_filename(search: Option<&str>, max_len: usize, at: &DateTime<Utc>) -> String {
    let search = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("_Search-{}", sanitize_context(s, max_len)))
        .unwrap_or_default();
    format!("Sales-Chat-History{search}-{}.pdf", timestamp(at))
}

pub fn dashboard_filename(location: Option<&str>, at: &DateTime<Utc>) -> String {
    let location = location
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| sanitize_context(l, usize::MAX))
        .unwrap_or_else(|| ALL_REGIONS.to_string());
    format!("Sales-Report-{location}-{}.pdf", timestamp(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 14, 5, 59).unwrap()
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_context("Sales in Texas?", 20), "Sales-in-Texas-");
        assert_eq!(sanitize_context("What were total sales in 2024?", 20), "What-were-total-sale");
        assert_eq!(sanitize_context("café", 20), "caf-");
        assert_eq!(sanitize_context("", 20), "");
    }

    #[test]
    fn test_timestamp_is_minute_precision() {
        assert_eq!(timestamp(&at()), "2024-03-04_14-05");
    }

    #[test]
    fn test_suggestions_filename() {
        assert_eq!(
            suggestions_filename("top cities", 20, &at()),
            "Sales-Suggestions-top-cities-2024-03-04_14-05.pdf"
        );
    }

    #[test]
    fn test_transcript_filename() {
        assert_eq!(
            transcript_filename(None, 20, &at()),
            "Sales-Chat-History-2024-03-04_14-05.pdf"
        );
        assert_eq!(
            transcript_filename(Some("  "), 20, &at()),
            "Sales-Chat-History-2024-03-04_14-05.pdf"
        );
        assert_eq!(
            transcript_filename(Some("texas sales"), 20, &at()),
            "Sales-Chat-History_Search-texas-sales-2024-03-04_14-05.pdf"
        );
    }

    #[test]
    fn test_dashboard_filename() {
        assert_eq!(
            dashboard_filename(None, &at()),
            "Sales-Report-All-Regions-2024-03-04_14-05.pdf"
        );
        assert_eq!(
            dashboard_filename(Some("New York"), &at()),
            "Sales-Report-New-York-2024-03-04_14-05.pdf"
        );
    }
}
