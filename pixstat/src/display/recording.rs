use super::{DisplaySurface, StatsReport};
use anyhow::anyhow;

/// Headless surface that records what would have been shown.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    /// Every report passed to `show_statistics`, in call order
    pub reports: Vec<StatsReport>,
    /// Every `(title, message)` passed to `show_error`, in call order
    pub errors: Vec<(String, String)>,
    /// When set, `show_statistics` fails with this message
    pub fail_with: Option<String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose `show_statistics` always fails.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }
}

impl DisplaySurface for RecordingSurface {
    fn show_statistics(&mut self, report: &StatsReport) -> anyhow::Result<()> {
        if let Some(msg) = &self.fail_with {
            return Err(anyhow!("{msg}"));
        }
        self.reports.push(report.clone());
        Ok(())
    }

    fn show_error(&mut self, title: &str, message: &str) -> anyhow::Result<()> {
        self.errors.push((title.to_string(), message.to_string()));
        Ok(())
    }
}
