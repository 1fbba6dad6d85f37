use clap::{arg, command};
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("siteaudit")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("siteaudit")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("audit")
                .about(
                    "Crawl a website to a bounded page count and audit its links, \
                images, SEO signals and forms.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The URL to audit")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-l --"limit" <PAGES>)
                        .required(false)
                        .help("Maximum number of pages to crawl")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("5"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv")
                        .value_parser(["text", "json", "csv"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"no-performance")
                        .required(false)
                        .help("Skip the PageSpeed Insights performance audit")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"no-tracking")
                        .required(false)
                        .help("Skip the tracking-tag audit")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_requires_url() {
        let result =
            command_argument_builder().try_get_matches_from(["siteaudit", "audit"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_audit_defaults() {
        let matches = command_argument_builder()
            .try_get_matches_from(["siteaudit", "audit", "-u", "https://example.com"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();

        assert_eq!(sub.get_one::<usize>("limit"), Some(&5));
        assert_eq!(sub.get_one::<String>("format").map(String::as_str), Some("text"));
        assert!(!sub.get_flag("no-performance"));
        assert!(!sub.get_flag("no-tracking"));
    }

    #[test]
    fn test_audit_rejects_unknown_format() {
        let result = command_argument_builder().try_get_matches_from([
            "siteaudit",
            "audit",
            "-u",
            "https://example.com",
            "-f",
            "xml",
        ]);
        assert!(result.is_err());
    }
}
