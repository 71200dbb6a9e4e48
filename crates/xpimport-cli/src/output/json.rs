//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;
use xpimport_core::ManifestRecord;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_record(&self, record: &ManifestRecord) -> Result<()> {
        #[derive(Serialize)]
        struct TargetAppOutput {
            application: String,
            application_id: u32,
            min_version: String,
            max_version: String,
        }

        #[derive(Serialize)]
        struct RecordOutput {
            guid: String,
            addon_type: String,
            name: Option<String>,
            version: Option<String>,
            homepage: Option<String>,
            description: Option<String>,
            target_applications: Vec<TargetAppOutput>,
        }

        let data = RecordOutput {
            guid: record.guid.clone(),
            addon_type: record.addon_type.to_string(),
            name: record.name.clone(),
            version: record.version.clone(),
            homepage: record.homepage.clone(),
            description: record.description.clone(),
            target_applications: record
                .apps
                .iter()
                .map(|app| TargetAppOutput {
                    application: app.application.short_name.to_owned(),
                    application_id: app.application.id,
                    min_version: app.min.version.clone(),
                    max_version: app.max.version.clone(),
                })
                .collect(),
        };

        let output = JsonOutput::success("inspect", data);
        Self::output(&output)
    }

    fn format_extraction(&self, dest: &Path, written: &[PathBuf]) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractionOutput {
            output_dir: String,
            entries_written: usize,
            entries: Vec<String>,
        }

        let data = ExtractionOutput {
            output_dir: dest.display().to_string(),
            entries_written: written.len(),
            entries: written.iter().map(|p| p.display().to_string()).collect(),
        };

        let output = JsonOutput::success("extract", data);
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("unknown", format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_formatter_output_structure() {
        #[derive(Serialize)]
        struct TestData {
            value: String,
        }

        let data = TestData {
            value: "test".to_string(),
        };

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"value\""));
        assert!(json.contains("\"test\""));
    }
}
