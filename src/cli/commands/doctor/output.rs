use crate::cli::DoctorFormat;
use crate::diagnostics::{CheckResult, CheckStatus, DiagnosticReport, ReadinessStatus};
use crate::environment::{EnvironmentSnapshot, SupabaseStatus};
use anyhow::Result;
use serde::Serialize;

/// Output and reporting functionality for diagnostics
pub struct DiagnosticOutput {
    format: DoctorFormat,
    verbose: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a DiagnosticReport,
    environment: &'a EnvironmentSnapshot,
    ready: bool,
}

impl DiagnosticOutput {
    pub fn new(format: DoctorFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    fn is_verbose(&self) -> bool {
        self.verbose && !matches!(self.format, DoctorFormat::Json)
    }

    pub fn print_header(&self) {
        println!("🩺 MYLIFEPICTURES DOCTOR - Supabase Configuration Test");
        println!("=====================================================");
        println!();
    }

    pub fn print_row(&self, result: &CheckResult) {
        println!("{}", self.render_row(result));
    }

    /// One result row; details and action only for problems unless verbose
    pub fn render_row(&self, result: &CheckResult) -> String {
        let status_icon = match result.status {
            CheckStatus::Success => "✅",
            CheckStatus::Error => "❌",
            CheckStatus::Warning => "⚠️",
            CheckStatus::Pending => "⏳",
        };

        let mut lines = vec![format!("{} {}: {}", status_icon, result.name, result.message)];

        if self.is_verbose()
            || matches!(result.status, CheckStatus::Error | CheckStatus::Warning)
        {
            if let Some(details) = &result.details {
                lines.push(format!("   Details: {}", details));
            }
            if let Some(action) = &result.action {
                lines.push(format!("   💡 Action: {}", action));
            }
        }

        lines.join("\n")
    }

    pub fn output_report(&self, report: &DiagnosticReport, status: &SupabaseStatus) -> Result<()> {
        match self.format {
            DoctorFormat::Json => {
                let json = JsonReport {
                    report,
                    environment: &status.snapshot,
                    ready: status.is_ready(),
                };
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            DoctorFormat::Text => {
                self.output_text_summary(report);
                println!("{}", render_environment_panel(status));
            }
        }
        Ok(())
    }

    fn output_text_summary(&self, report: &DiagnosticReport) {
        println!();
        println!("📊 DIAGNOSTIC SUMMARY:");
        println!("─────────────────────");
        println!("Total checks: {}", report.summary.total_checks);
        if report.summary.passed > 0 {
            println!("✅ Passed: {}", report.summary.passed);
        }
        if report.summary.failed > 0 {
            println!("❌ Failed: {}", report.summary.failed);
        }
        if report.summary.warnings > 0 {
            println!("⚠️  Warnings: {}", report.summary.warnings);
        }
        if report.halted_early {
            println!("⏹️  Remaining checks skipped until the configuration error is fixed");
        }
        println!();

        match report.readiness {
            ReadinessStatus::Ready => println!("✅ Supabase is healthy and ready for use!"),
            ReadinessStatus::PartiallyReady => println!(
                "⚠️  Supabase is functional but has {} warning(s) that should be addressed.",
                report.summary.warnings
            ),
            ReadinessStatus::NotReady => println!(
                "❌ Supabase has {} critical issue(s) that must be resolved.",
                report.summary.failed
            ),
        }
        println!();
    }
}

fn set_or_missing(present: bool) -> &'static str {
    if present {
        "✅ Set"
    } else {
        "❌ Missing"
    }
}

/// Environment variable panel shared by `doctor` and `status`
pub fn render_environment_panel(status: &SupabaseStatus) -> String {
    let snapshot = &status.snapshot;
    let presence = &snapshot.presence;
    let key = if snapshot.key.is_empty() {
        "Not set".to_string()
    } else {
        format!("{}...", snapshot.key_prefix(15))
    };

    let mut lines = vec![
        "🔧 ENVIRONMENT VARIABLES:".to_string(),
        "────────────────────────".to_string(),
        "VITE_ variables (recommended):".to_string(),
        format!("   URL: {}", set_or_missing(presence.vite_url)),
        format!("   Key: {}", set_or_missing(presence.vite_key)),
        "NEXT_PUBLIC_ variables (fallback):".to_string(),
        format!("   URL: {}", set_or_missing(presence.next_url)),
        format!("   Key: {}", set_or_missing(presence.next_key)),
        String::new(),
        "Currently using:".to_string(),
        format!("   URL: {}", snapshot.url),
        format!("   Key: {}", key),
        format!("   Source: {}", snapshot.source().label()),
        String::new(),
    ];

    if status.is_ready() {
        lines.push("🟢 Ready to Use - Supabase is properly configured".to_string());
    } else {
        lines.push(
            "🔴 Configuration Required - set your Supabase API key environment variable"
                .to_string(),
        );
    }

    lines.join("\n")
}
