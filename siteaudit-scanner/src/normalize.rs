use url::Url;

/// Resolve a discovered link against the page it was found on.
///
/// Only two shapes are considered checkable: links that already carry an
/// http(s) scheme (returned untouched) and root-relative paths (joined onto
/// the base URL). Everything else - relative paths, bare fragments,
/// `mailto:`, `tel:`, protocol-relative `//host` - is deliberately out of
/// scope and dropped, not an error.
pub fn normalize_url(link: &str, base: &str) -> Option<String> {
    if link.is_empty() {
        return None;
    }

    if link.starts_with("http://") || link.starts_with("https://") {
        return Some(link.to_string());
    }

    if link.starts_with("//") {
        return None;
    }

    if link.starts_with('/') {
        let base = Url::parse(base).ok()?;
        return base.join(link).ok().map(String::from);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_links_pass_through() {
        assert_eq!(
            normalize_url("https://a.com/x", "https://b.com"),
            Some("https://a.com/x".to_string())
        );
        assert_eq!(
            normalize_url("http://a.com/x?q=1", "https://b.com/page"),
            Some("http://a.com/x?q=1".to_string())
        );
    }

    #[test]
    fn test_root_relative_resolves_against_base() {
        assert_eq!(
            normalize_url("/x", "https://a.com/y"),
            Some("https://a.com/x".to_string())
        );
        assert_eq!(
            normalize_url("/a/b?c=d", "https://a.com/deep/page"),
            Some("https://a.com/a/b?c=d".to_string())
        );
    }

    #[test]
    fn test_empty_link_is_rejected() {
        assert_eq!(normalize_url("", "https://a.com"), None);
    }

    #[test]
    fn test_out_of_scope_shapes_are_rejected() {
        assert_eq!(normalize_url("mailto:a@b.com", "https://a.com"), None);
        assert_eq!(normalize_url("tel:+15551234", "https://a.com"), None);
        assert_eq!(normalize_url("page.html", "https://a.com/dir/"), None);
        assert_eq!(normalize_url("../up", "https://a.com/dir/"), None);
        assert_eq!(normalize_url("#section", "https://a.com"), None);
        assert_eq!(normalize_url("//cdn.example.com/x.js", "https://a.com"), None);
    }

    #[test]
    fn test_root_relative_with_unparseable_base_is_rejected() {
        assert_eq!(normalize_url("/x", "not a url"), None);
    }
}
