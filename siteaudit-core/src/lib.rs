pub mod audit;
pub mod pagespeed;
pub mod report;
pub mod tracking;

use colored::Colorize;

pub fn print_banner() {
    println!(
        "{}",
        r#"
      _ _                        _ _ _
  ___(_) |_ ___  __ _ _   _  __| (_) |_
 / __| | __/ _ \/ _` | | | |/ _` | | __|
 \__ \ | ||  __/ (_| | |_| | (_| | | |_
 |___/_|\__\___|\__,_|\__,_|\__,_|_|\__|
"#
        .bright_cyan()
    );
    println!(
        "  {} v{}\n",
        "website link, SEO and form auditor".bright_white(),
        env!("CARGO_PKG_VERSION")
    );
}
