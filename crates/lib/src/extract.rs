//! # Search Result Extraction
//!
//! Helpers that turn a raw search-provider payload into candidate profile URLs
//! and a profile identifier.

use serde_json::Value;

/// URLs containing this fragment point back at the search engine itself.
pub const DEFAULT_BLOCKED_URL_FRAGMENT: &str = "google.";

/// The path prefix that precedes a public profile identifier.
pub const DEFAULT_PROFILE_MARKER: &str = "linkedin.com/in/";

/// Collects every string stored under a `"url"` key anywhere in `data`.
///
/// The walk is depth-first and follows object-entry order, then array order.
/// Values containing `blocked_fragment` are skipped. Nothing is deduplicated.
pub fn extract_urls(data: &Value, blocked_fragment: &str) -> Vec<String> {
    let mut urls = Vec::new();
    collect_urls(data, blocked_fragment, &mut urls);
    urls
}

fn collect_urls(data: &Value, blocked_fragment: &str, urls: &mut Vec<String>) {
    match data {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::String(url) if key == "url" && !url.contains(blocked_fragment) => {
                        urls.push(url.clone());
                    }
                    other => collect_urls(other, blocked_fragment, urls),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_urls(item, blocked_fragment, urls);
            }
        }
        _ => {}
    }
}

/// Returns the path segment following `marker` in the first URL that contains it.
///
/// The segment ends at the next `/` or at the end of the URL. `None` means no
/// URL matched, which is a normal outcome rather than an error.
pub fn resolve_profile_id<S: AsRef<str>>(urls: &[S], marker: &str) -> Option<String> {
    urls.iter().find_map(|url| {
        let url = url.as_ref();
        let start = url.find(marker)? + marker.len();
        let rest = &url[start..];
        let segment = rest.split('/').next().unwrap_or_default();
        Some(segment.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_urls_skips_blocked_and_recurses() {
        let payload = json!({
            "a": {"url": "https://google.com/x"},
            "b": [{"url": "https://linkedin.com/in/jdoe/"}]
        });

        let urls = extract_urls(&payload, DEFAULT_BLOCKED_URL_FRAGMENT);

        assert_eq!(urls, vec!["https://linkedin.com/in/jdoe/".to_string()]);
    }

    #[test]
    fn test_extract_urls_keeps_document_order_and_duplicates() {
        let payload = json!({
            "results": [
                {"content": {"organic": [
                    {"url": "https://a.example/1", "title": "one"},
                    {"url": "https://b.example/2"}
                ]}},
                {"url": "https://a.example/1"}
            ],
            "url": "https://z.example/root"
        });

        let urls = extract_urls(&payload, DEFAULT_BLOCKED_URL_FRAGMENT);

        assert_eq!(
            urls,
            vec![
                "https://a.example/1",
                "https://b.example/2",
                "https://a.example/1",
                "https://z.example/root",
            ]
        );
    }

    #[test]
    fn test_extract_urls_ignores_non_string_url_values_but_recurses_into_them() {
        let payload = json!({
            "url": {"url": "https://nested.example/"},
            "other": 42,
            "list": [null, true, "https://not-keyed.example/"]
        });

        let urls = extract_urls(&payload, DEFAULT_BLOCKED_URL_FRAGMENT);

        assert_eq!(urls, vec!["https://nested.example/"]);
    }

    #[test]
    fn test_extract_urls_on_scalars_is_empty() {
        assert!(extract_urls(&json!("https://x.example"), "google.").is_empty());
        assert!(extract_urls(&Value::Null, "google.").is_empty());
    }

    #[test]
    fn test_resolve_profile_id_takes_first_match() {
        let urls = [
            "https://example.com/foo",
            "https://linkedin.com/in/jdoe/extra",
            "https://linkedin.com/in/other",
        ];

        assert_eq!(
            resolve_profile_id(&urls, DEFAULT_PROFILE_MARKER),
            Some("jdoe".to_string())
        );
    }

    #[test]
    fn test_resolve_profile_id_without_trailing_slash() {
        let urls = ["https://de.linkedin.com/in/max-mustermann-123abc"];

        assert_eq!(
            resolve_profile_id(&urls, DEFAULT_PROFILE_MARKER),
            Some("max-mustermann-123abc".to_string())
        );
    }

    #[test]
    fn test_resolve_profile_id_absent() {
        let empty: [&str; 0] = [];
        assert_eq!(resolve_profile_id(&empty, DEFAULT_PROFILE_MARKER), None);

        let urls = ["https://example.com/foo", "https://linkedin.com/company/acme"];
        assert_eq!(resolve_profile_id(&urls, DEFAULT_PROFILE_MARKER), None);
    }
}
