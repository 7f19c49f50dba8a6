use std::path::PathBuf;

use clap::Parser;
use subgroups::{
    storage::{collect_manifest_paths, scan},
    Config, Finding, Report,
};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Validate the subgroup hierarchies in manifest files")]
pub struct Validate {
    /// Manifest files or directories to scan
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Only print rejected declarations
    #[arg(long, short)]
    quiet: bool,
}

impl Default for Validate {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from(".")],
            output: OutputFormat::default(),
            quiet: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Summary,
}

impl Validate {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let mut paths = Vec::new();
        for root in &self.paths {
            paths.extend(collect_manifest_paths(root, config)?);
        }
        tracing::info!("Validating {} manifest file(s)", paths.len());

        let report = scan(&paths, config)?;

        match self.output {
            OutputFormat::Table => self.output_table(&report),
            OutputFormat::Json => Self::output_json(&report)?,
            OutputFormat::Summary => Self::output_summary(&report),
        }

        if !report.is_clean() {
            std::process::exit(2);
        }

        Ok(())
    }

    fn output_table(&self, report: &Report) {
        for finding in report.findings() {
            match &finding.outcome {
                Ok(()) if self.quiet => {}
                Ok(()) => println!(
                    "✅ {} {}",
                    location(finding),
                    format!("({} subgroups)", finding.subgroups).dim()
                ),
                Err(error) => println!(
                    "❌ {}: {}",
                    location(finding),
                    error.to_string().failure()
                ),
            }
        }

        if self.quiet {
            return;
        }

        for error in report.skipped() {
            println!("⚠️  {}", error.to_string().warning());
        }

        let accepted = report.accepted().count();
        let rejected = report.rejected().count();
        println!();
        if rejected == 0 {
            println!(
                "{}",
                format!("{accepted} accepted, 0 rejected").success()
            );
        } else {
            println!(
                "{}",
                format!("{accepted} accepted, {rejected} rejected").failure()
            );
        }
    }

    fn output_json(report: &Report) -> anyhow::Result<()> {
        use serde_json::json;

        let findings: Vec<_> = report
            .findings()
            .iter()
            .map(|finding| {
                let error = finding.outcome.as_ref().err().map(|error| {
                    json!({
                        "kind": error.kind(),
                        "message": error.to_string(),
                    })
                });
                json!({
                    "path": finding.path.display().to_string(),
                    "document": finding.document,
                    "name": finding.name,
                    "subgroups": finding.subgroups,
                    "accepted": finding.is_accepted(),
                    "error": error,
                })
            })
            .collect();

        let skipped: Vec<_> = report
            .skipped()
            .iter()
            .map(|error| {
                json!({
                    "path": error.path().display().to_string(),
                    "message": error.to_string(),
                })
            })
            .collect();

        let output = json!({
            "findings": findings,
            "skipped": skipped,
            "accepted": report.accepted().count(),
            "rejected": report.rejected().count(),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_summary(report: &Report) {
        println!(
            "accepted={} rejected={} skipped={}",
            report.accepted().count(),
            report.rejected().count(),
            report.skipped().len()
        );
    }
}

fn location(finding: &Finding) -> String {
    format!(
        "{}#{} {}",
        finding.path.display(),
        finding.document,
        finding.name
    )
}
