//! Progress line formatters

use crate::JointProgress;

/// Formats one joint progress sample into a single line
pub trait ProgressFormatter: Send {
    /// Render the sample
    fn format(&self, progress: &JointProgress) -> String;
}

/// Human-readable output (default)
#[derive(Debug, Default)]
pub struct HumanFormatter;

impl HumanFormatter {
    /// Create a human formatter
    pub fn new() -> Self {
        Self
    }
}

impl ProgressFormatter for HumanFormatter {
    fn format(&self, progress: &JointProgress) -> String {
        format!(
            "progress: sample={} user={} total={}",
            progress.sample,
            progress.user,
            progress.total()
        )
    }
}

/// JSON structured output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a JSON formatter
    pub fn new() -> Self {
        Self
    }
}

impl ProgressFormatter for JsonFormatter {
    fn format(&self, progress: &JointProgress) -> String {
        serde_json::json!({
            "sample": progress.sample,
            "user": progress.user,
            "total": progress.total(),
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_format() {
        let line = HumanFormatter::new().format(&JointProgress {
            sample: 120,
            user: 45,
        });
        assert_eq!(line, "progress: sample=120 user=45 total=165");
    }

    #[test]
    fn test_json_format_round_trips() {
        let line = JsonFormatter::new().format(&JointProgress { sample: 7, user: 0 });

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["sample"], 7);
        assert_eq!(value["user"], 0);
        assert_eq!(value["total"], 7);
    }
}
