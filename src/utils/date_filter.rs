use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn date_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date regex"))
}

/// Empty, or a real calendar date written exactly as `YYYY-MM-DD`.
///
/// The shape check comes first because chrono's `%m`/`%d` also accept
/// single digits (`2025-5-1`).
pub fn validate_date(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    date_shape().is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// An empty field means "no filter" and is sent as `null`.
pub fn date_filter(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
