pub mod analyzer;
pub mod audit;
pub mod checker;
pub mod crawler;
pub mod error;
pub mod findings;
pub mod normalize;

pub use checker::LinkChecker;
pub use crawler::Crawler;
pub use error::AuditError;
pub use findings::{BrokenLinkFinding, CrawlFindings, FormFinding, SeoFinding, StatusOutcome};
pub use normalize::normalize_url;
