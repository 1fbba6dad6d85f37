use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Placeholder recorded when an element has no usable target attribute.
pub const MISSING_TARGET: &str = "EMPTY";

/// Outcome of probing a single URL.
///
/// A received HTTP status is successful transport whatever the code; only
/// network-level failures (timeout, DNS, redirect limit) become `Failed`.
/// `NotChecked` marks findings recorded without issuing a request at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    Status(u16),
    Failed,
    NotChecked,
}

impl StatusOutcome {
    pub fn is_healthy(&self) -> bool {
        matches!(self, StatusOutcome::Status(code) if (200..300).contains(code))
    }
}

impl fmt::Display for StatusOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusOutcome::Status(code) => write!(f, "{}", code),
            StatusOutcome::Failed => write!(f, "FAILED"),
            StatusOutcome::NotChecked => write!(f, "N/A"),
        }
    }
}

// Serialized as a bare number or the legacy "FAILED"/"N/A" markers so report
// consumers see the same shape the JSON output has always had.
impl Serialize for StatusOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatusOutcome::Status(code) => serializer.serialize_u16(*code),
            StatusOutcome::Failed => serializer.serialize_str("FAILED"),
            StatusOutcome::NotChecked => serializer.serialize_str("N/A"),
        }
    }
}

impl<'de> Deserialize<'de> for StatusOutcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u16),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Ok(StatusOutcome::Status(code)),
            Raw::Marker(marker) => match marker.as_str() {
                "FAILED" => Ok(StatusOutcome::Failed),
                "N/A" => Ok(StatusOutcome::NotChecked),
                other => Err(serde::de::Error::custom(format!(
                    "unknown status outcome: {other}"
                ))),
            },
        }
    }
}

/// Why a link or image was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkClass {
    #[serde(rename = "Invalid link")]
    Invalid,
    #[serde(rename = "Broken link")]
    Broken,
    #[serde(rename = "Redirect")]
    Redirect,
    #[serde(rename = "Request failed")]
    RequestFailed,
    #[serde(rename = "Broken image")]
    BrokenImage,
}

impl LinkClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkClass::Invalid => "Invalid link",
            LinkClass::Broken => "Broken link",
            LinkClass::Redirect => "Redirect",
            LinkClass::RequestFailed => "Request failed",
            LinkClass::BrokenImage => "Broken image",
        }
    }
}

impl fmt::Display for LinkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One anomalous link or image discovered on a page. Never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokenLinkFinding {
    pub page_url: String,
    /// Normalized target URL, or `EMPTY` when the element had none.
    pub target: String,
    /// Anchor text, or `IMAGE` for image findings.
    pub anchor_text: String,
    pub status: StatusOutcome,
    pub classification: LinkClass,
}

/// On-page SEO signals for one crawled page.
///
/// `sitemap_accessible` is a crawl-wide fact probed once against the start
/// URL's host; the orchestrator copies it into every page's finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoFinding {
    pub page_url: String,
    pub title_present: bool,
    pub meta_description_present: bool,
    pub h1_count: usize,
    pub missing_alt_count: usize,
    pub canonical_present: bool,
    pub sitemap_accessible: bool,
}

/// Usability signals for one `<form>` element, indexed 1-based in document
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFinding {
    pub page_url: String,
    pub form_index: usize,
    pub method: String,
    pub field_count: usize,
    /// The `action` attribute, or `EMPTY` when absent or blank.
    pub action: String,
    pub action_valid: bool,
    pub submit_reachable: bool,
    pub issue: String,
}

pub const FORM_ISSUE: &str = "Form not submitting";
pub const FORM_NO_ISSUE: &str = "No issue detected";

/// Aggregated output of one crawl.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlFindings {
    pub broken_links: Vec<BrokenLinkFinding>,
    pub seo_checks: Vec<SeoFinding>,
    pub form_checks: Vec<FormFinding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_outcome_serializes_like_legacy_json() {
        assert_eq!(
            serde_json::to_string(&StatusOutcome::Status(404)).unwrap(),
            "404"
        );
        assert_eq!(
            serde_json::to_string(&StatusOutcome::Failed).unwrap(),
            "\"FAILED\""
        );
        assert_eq!(
            serde_json::to_string(&StatusOutcome::NotChecked).unwrap(),
            "\"N/A\""
        );
    }

    #[test]
    fn test_status_outcome_round_trips() {
        for outcome in [
            StatusOutcome::Status(301),
            StatusOutcome::Failed,
            StatusOutcome::NotChecked,
        ] {
            let json = serde_json::to_string(&outcome).unwrap();
            let back: StatusOutcome = serde_json::from_str(&json).unwrap();
            assert_eq!(back, outcome);
        }
    }

    #[test]
    fn test_status_outcome_healthy_range() {
        assert!(StatusOutcome::Status(200).is_healthy());
        assert!(StatusOutcome::Status(204).is_healthy());
        assert!(!StatusOutcome::Status(301).is_healthy());
        assert!(!StatusOutcome::Status(404).is_healthy());
        assert!(!StatusOutcome::Failed.is_healthy());
        assert!(!StatusOutcome::NotChecked.is_healthy());
    }

    #[test]
    fn test_link_class_display() {
        assert_eq!(LinkClass::Broken.to_string(), "Broken link");
        assert_eq!(LinkClass::BrokenImage.to_string(), "Broken image");
    }
}
