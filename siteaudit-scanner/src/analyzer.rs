use crate::findings::{FORM_ISSUE, FORM_NO_ISSUE, FormFinding, MISSING_TARGET, SeoFinding};
use scraper::{Html, Selector};

/// Extract on-page SEO signals from a parsed document.
///
/// Pure function of its input; `sitemap_accessible` is left `false` for the
/// crawl orchestrator to fill in, since it is a per-crawl fact and not a
/// per-page one.
pub fn analyze_seo(page_url: &str, document: &Html) -> SeoFinding {
    let title_selector = Selector::parse("title").unwrap();
    let meta_selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    let h1_selector = Selector::parse("h1").unwrap();
    let img_selector = Selector::parse("img").unwrap();
    let canonical_selector = Selector::parse(r#"link[rel="canonical"]"#).unwrap();

    let title_present = document
        .select(&title_selector)
        .next()
        .map(|el| !el.text().collect::<String>().trim().is_empty())
        .unwrap_or(false);

    let meta_description_present = document
        .select(&meta_selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .is_some_and(|content| !content.is_empty());

    let h1_count = document.select(&h1_selector).count();

    let missing_alt_count = document
        .select(&img_selector)
        .filter(|img| img.value().attr("alt").is_none_or(str::is_empty))
        .count();

    let canonical_present = document.select(&canonical_selector).next().is_some();

    SeoFinding {
        page_url: page_url.to_string(),
        title_present,
        meta_description_present,
        h1_count,
        missing_alt_count,
        canonical_present,
        sitemap_accessible: false,
    }
}

/// Extract usability signals for every `<form>` on the page, in document
/// order. A page with no forms yields an empty vec, not an error.
pub fn analyze_forms(page_url: &str, document: &Html) -> Vec<FormFinding> {
    let form_selector = Selector::parse("form").unwrap();
    let field_selector = Selector::parse("input, textarea, select").unwrap();
    let submit_selector =
        Selector::parse(r#"button[type="submit"], input[type="submit"]"#).unwrap();

    document
        .select(&form_selector)
        .enumerate()
        .map(|(index, form)| {
            let action = form.value().attr("action").filter(|a| !a.is_empty());
            let method = form
                .value()
                .attr("method")
                .filter(|m| !m.is_empty())
                .unwrap_or("GET")
                .to_uppercase();

            let field_count = form.select(&field_selector).count();

            // A form without a submit control is still submittable (implicit
            // submission), so only an explicitly disabled control counts.
            let submit_reachable = form.select(&submit_selector).next().is_none_or(|submit| {
                submit.value().attr("disabled").is_none()
                    && !submit.value().classes().any(|class| class == "disabled")
            });

            let action_valid =
                action.is_some_and(|a| a != "#" && !a.starts_with("javascript"));

            let issue = if !action_valid || !submit_reachable {
                FORM_ISSUE
            } else {
                FORM_NO_ISSUE
            };

            FormFinding {
                page_url: page_url.to_string(),
                form_index: index + 1,
                method,
                field_count,
                action: action.unwrap_or(MISSING_TARGET).to_string(),
                action_valid,
                submit_reachable,
                issue: issue.to_string(),
            }
        })
        .collect()
}
