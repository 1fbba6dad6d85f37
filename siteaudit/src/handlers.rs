use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use siteaudit_core::audit::{AuditOptions, AuditProgressCallback, AuditReport, execute_audit};
use siteaudit_core::report::{
    ReportFormat, generate_csv_report, generate_json_report, generate_text_report, save_report,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub async fn handle_audit(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let url = sub_matches.get_one::<Url>("url").unwrap();
    let limit = sub_matches.get_one::<usize>("limit").unwrap_or(&5);
    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);
    let output = sub_matches.get_one::<PathBuf>("output");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Auditing {}", url));

    let mut options = AuditOptions::new(url.as_str());
    options.page_limit = *limit;
    options.check_performance = !sub_matches.get_flag("no-performance");
    options.check_tracking = !sub_matches.get_flag("no-tracking");

    let spinner_clone = spinner.clone();
    let progress_callback: AuditProgressCallback = Arc::new(move |message: String| {
        spinner_clone.set_message(message);
    });

    match execute_audit(options, Some(progress_callback)).await {
        Ok(report) => {
            spinner.finish_and_clear();
            println!("{} Audit complete!\n", "✓".green().bold());

            let rendered = match render_report(&report, format) {
                Ok(rendered) => rendered,
                Err(e) => {
                    eprintln!("{} Failed to render report: {}", "✗".red().bold(), e);
                    std::process::exit(1);
                }
            };

            if let Some(output) = output {
                let path = resolve_output_path(output);
                match save_report(&rendered, &path) {
                    Ok(()) => {
                        println!("{} Report saved to {}", "✓".green().bold(), path.display())
                    }
                    Err(e) => {
                        eprintln!(
                            "{} Failed to save report to {}: {}",
                            "✗".red().bold(),
                            path.display(),
                            e
                        );
                        std::process::exit(1);
                    }
                }
            } else {
                print!("{}", rendered);
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("{} Audit failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Render a report in the requested format. Only JSON rendering can fail.
pub fn render_report(
    report: &AuditReport,
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    Ok(match format {
        ReportFormat::Text => generate_text_report(report),
        ReportFormat::Json => generate_json_report(report)?,
        ReportFormat::Csv => generate_csv_report(report),
    })
}

/// Expand a user-supplied output path (`~` included) into a usable one.
pub fn resolve_output_path(path: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    PathBuf::from(expanded)
}
