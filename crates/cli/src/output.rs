//! Output formatting for CLI

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use treenav_navigator::NavigationPath;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Plain text format
    Plain,
}

/// Summary of either search mode
#[derive(Debug, Serialize)]
pub struct SearchReport {
    pub mode: &'static str,
    pub success: bool,
    /// Only set by `find`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_exact: Option<bool>,
    pub path: NavigationPath,
    pub attempts: usize,
}

impl SearchReport {
    fn result(&self) -> &'static str {
        match (self.mode, self.success) {
            (_, true) => "found",
            ("find", false) => "not found",
            _ => "exhausted",
        }
    }

    fn exact(&self) -> &'static str {
        match self.matched_exact {
            Some(true) => "yes",
            Some(false) => "no",
            None => "-",
        }
    }
}

/// Render a report in the requested format
pub fn render_report(report: &SearchReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => {
            let mut summary = Table::new();
            summary
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["MODE", "RESULT", "EXACT", "ATTEMPTS"])
                .add_row(vec![
                    report.mode.to_string(),
                    report.result().to_string(),
                    report.exact().to_string(),
                    report.attempts.to_string(),
                ]);

            if report.path.is_empty() {
                return format!("{summary}\nPath: (root)");
            }

            let mut steps = Table::new();
            steps
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["LEVEL", "NAME", "INDEX"]);
            for step in report.path.steps() {
                steps.add_row(vec![
                    step.level.to_string(),
                    step.name.clone(),
                    step.index.to_string(),
                ]);
            }
            format!("{summary}\n{steps}")
        }
        OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(report).unwrap_or_default(),
        OutputFormat::Plain => {
            let path = if report.path.is_empty() {
                "-".to_string()
            } else {
                report.path.to_string()
            };
            format!(
                "mode: {}\nresult: {}\nexact: {}\npath: {}\nattempts: {}",
                report.mode,
                report.result(),
                report.exact(),
                path,
                report.attempts
            )
        }
    }
}

pub fn print_report(report: &SearchReport, format: OutputFormat) {
    println!("{}", render_report(report, format));
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("❌ {}", message);
}
