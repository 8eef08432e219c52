// Field-level validation helpers shared by the step validators

use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;

/// Dates cross the wire as plain `YYYY-MM-DD` strings.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Loose email shape check. The backend performs the authoritative check; this
/// only gates obviously malformed input before a remote call is spent on it.
pub fn is_valid_email(value: &str) -> bool {
    let v = value.trim();
    if v.is_empty() || v.len() > 254 {
        return false;
    }
    match Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$") {
        Ok(re) => re.is_match(v),
        Err(_) => false,
    }
}

/// Phone numbers are accepted with spaces and dashes; after stripping those,
/// an optional leading `+` followed by 7-15 digits must remain.
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    match Regex::new(r"^\+?[0-9]{7,15}$") {
        Ok(re) => re.is_match(&compact),
        Err(_) => false,
    }
}

/// Parse a date in the portal's wire format.
pub fn parse_wire_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), WIRE_DATE_FORMAT)
        .map_err(|e| anyhow::anyhow!("invalid date '{}': {}", value, e))
}

/// Format a date for the wire.
pub fn format_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

/// Completion years accepted on qualification entries.
pub fn is_plausible_year(year: i32) -> bool {
    (1900..=2100).contains(&year)
}
