//! Output formatting for teardown plans

use anyhow::{Context, Result};

use crate::gc::TeardownPlan;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_plan(&self, plan: &TeardownPlan) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(plan).context("Failed to serialize plan to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(plan).context("Failed to serialize plan to YAML")
            }
            OutputFormat::Human => Ok(self.format_plan_human(plan)),
        }
    }

    fn format_plan_human(&self, plan: &TeardownPlan) -> String {
        if !plan.initialized {
            return "No bbl state found; nothing would be removed.\n".to_string();
        }

        let mut out = String::new();
        Self::section(&mut out, "Files to remove", &plan.files);
        Self::section(&mut out, "Directories to remove", &plan.directories);
        Self::section(&mut out, "Preserved (not generated by bbl)", &plan.preserved);
        out
    }

    fn section(out: &mut String, title: &str, paths: &[std::path::PathBuf]) {
        if paths.is_empty() {
            return;
        }
        out.push_str(title);
        out.push_str(":\n");
        for path in paths {
            out.push_str("  ");
            out.push_str(&path.display().to_string());
            out.push('\n');
        }
    }
}
