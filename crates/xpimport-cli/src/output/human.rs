//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use std::path::PathBuf;
use xpimport_core::ManifestRecord;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn field(&self, label: &str, value: &str) {
        let _ = self.term.write_line(&format!("  {label:<13} {value}"));
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_record(&self, record: &ManifestRecord) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let name = record.name.as_deref().unwrap_or("(unnamed)");
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {name}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(name);
        }

        self.field("Id:", &record.guid);
        self.field("Type:", &record.addon_type.to_string());
        if let Some(version) = &record.version {
            self.field("Version:", version);
        }
        if let Some(homepage) = &record.homepage {
            self.field("Homepage:", homepage);
        }
        if self.verbose {
            if let Some(description) = &record.description {
                self.field("Description:", description);
            }
        }

        if !record.apps.is_empty() {
            let _ = self.term.write_line("  Compatible with:");
            for app in &record.apps {
                let _ = self.term.write_line(&format!(
                    "    {} {} – {}",
                    app.application.short_name, app.min.version, app.max.version
                ));
            }
        }

        Ok(())
    }

    fn format_extraction(&self, dest: &Path, written: &[PathBuf]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Extracted {} entries to {}",
                style("✓").green().bold(),
                written.len(),
                dest.display()
            ));
        } else {
            let _ = self.term.write_line(&format!(
                "Extracted {} entries to {}",
                written.len(),
                dest.display()
            ));
        }

        if self.verbose {
            for path in written {
                let _ = self.term.write_line(&format!("  {}", path.display()));
            }
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
