//! Post-processing of raw model output into a bare commit message.
//!
//! Models frequently wrap the message in a fenced code block or lead with a
//! narrative preamble despite the system prompt forbidding both. Cleaning
//! strips those artifacts and nothing else.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^```\w*\n?").expect("valid regex"));
static FENCE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n?```$").expect("valid regex"));
static PREAMBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(Here (is|'s) (a|the|your)|This is a) .+?:\s*").expect("valid regex")
});

/// Strip code fences and narrative preambles from raw model output.
///
/// Runs the strip pipeline to a fixed point, so cleaning is idempotent:
/// `clean_message(clean_message(x)) == clean_message(x)` for any input.
pub fn clean_message(raw: &str) -> String {
    let mut current = raw.trim().to_string();
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(message: &str) -> String {
    let message = message.trim();
    let message = FENCE_OPEN.replace(message, "");
    let message = FENCE_CLOSE.replace(&message, "");
    let message = PREAMBLE.replace(&message, "");
    message.trim().to_string()
}
