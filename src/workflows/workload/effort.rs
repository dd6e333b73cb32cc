//! Effort labels to points.
//!
//! Task exports carry effort as free text such as `"3"`, `"(hrs) 3"` or
//! `"2 (half day)"`. Parenthetical annotations are stripped before parsing a
//! bare number. Labels that still do not parse fall back to
//! [`DEFAULT_EFFORT`], and every value is halved into points
//! (1 hour = 0.5 points).

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Effort assumed when a label is missing or unparseable, before halving.
pub const DEFAULT_EFFORT: f64 = 0.5;

/// Hours per point.
pub const HOURS_PER_POINT: f64 = 2.0;

static PARENTHETICAL: OnceLock<Regex> = OnceLock::new();

fn parenthetical() -> &'static Regex {
    PARENTHETICAL.get_or_init(|| Regex::new(r"\([^)]*\)").expect("valid parenthetical regex"))
}

/// Parses the bare number in an effort label, if there is one.
///
/// Empty, malformed, negative and non-finite values all yield `None`.
pub fn parse_effort(label: &str) -> Option<f64> {
    let stripped = parenthetical().replace_all(label, "");
    let value = stripped.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Effort before halving, with the default substituted for unusable labels.
pub fn effort_value(label: &str) -> f64 {
    match parse_effort(label) {
        Some(value) => value,
        None => {
            if !label.trim().is_empty() {
                debug!(label, default = DEFAULT_EFFORT, "unparseable effort label");
            }
            DEFAULT_EFFORT
        }
    }
}

pub fn effort_points(label: &str) -> f64 {
    effort_value(label) / HOURS_PER_POINT
}

pub fn meeting_points(hours: f64) -> f64 {
    hours / HOURS_PER_POINT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_parenthetical_before_parsing() {
        assert_eq!(effort_points("(hrs) 3"), 1.5);
        assert_eq!(effort_points("3 (hrs)"), 1.5);
        assert_eq!(effort_points("(estimate) 2.5 (hrs)"), 1.25);
    }

    #[test]
    fn missing_and_malformed_labels_use_default() {
        assert_eq!(effort_points(""), 0.25);
        assert_eq!(effort_points("abc"), 0.25);
        assert_eq!(effort_points("(hrs)"), 0.25);
        assert_eq!(effort_points("   "), 0.25);
    }

    #[test]
    fn negative_and_non_finite_values_are_rejected() {
        assert_eq!(parse_effort("-4"), None);
        assert_eq!(parse_effort("NaN"), None);
        assert_eq!(parse_effort("inf"), None);
        assert_eq!(effort_points("-4"), 0.25);
    }

    #[test]
    fn reparsing_the_stringified_value_is_stable() {
        for label in ["(hrs) 3", "", "abc", "0", "7.5", "1 (pairing)", "12"] {
            let value = effort_value(label);
            assert_eq!(
                effort_points(&value.to_string()),
                effort_points(label),
                "label {label:?}"
            );
        }
    }

    #[test]
    fn meeting_hours_halve_without_default() {
        assert_eq!(meeting_points(0.0), 0.0);
        assert_eq!(meeting_points(3.0), 1.5);
    }
}
