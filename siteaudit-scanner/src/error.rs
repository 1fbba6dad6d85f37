use thiserror::Error;

/// The crawl's only fatal condition. Transport and parse problems during a
/// crawl degrade into `StatusOutcome::Failed` or skipped pages instead of
/// aborting it.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;
