//! Structured configuration issues.
//!
//! Config loading never fails on a questionable value. It reports a
//! [`ConfigIssue`] and falls back to the default for that field.

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssueCode {
    /// A string field that must not be empty was empty.
    EmptyValue { field: String },
    /// A numeric field was outside its accepted range.
    OutOfRange { field: String, value: f64, min: f64, max: f64 },
}

/// A detected issue in the configuration. Always non-fatal: the field's
/// default is used instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn empty_value(field: &str) -> Self {
        Self {
            code: ConfigIssueCode::EmptyValue {
                field: field.to_string(),
            },
            message: format!("{}: value is empty, using the default", field),
        }
    }

    pub fn out_of_range(field: &str, value: f64, min: f64, max: f64) -> Self {
        Self {
            code: ConfigIssueCode::OutOfRange {
                field: field.to_string(),
                value,
                min,
                max,
            },
            message: format!(
                "{}: {} is outside {}..={}, using the default",
                field, value, min, max
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_issue() {
        let issue = ConfigIssue::empty_value("gemini.model");
        assert_eq!(
            issue.code,
            ConfigIssueCode::EmptyValue {
                field: "gemini.model".to_string()
            }
        );
        assert_eq!(issue.message, "gemini.model: value is empty, using the default");
    }

    #[test]
    fn test_out_of_range_issue() {
        let issue = ConfigIssue::out_of_range("gemini.temperature", 1.9, 0.0, 0.5);
        assert_eq!(
            issue.message,
            "gemini.temperature: 1.9 is outside 0..=0.5, using the default"
        );
    }
}
