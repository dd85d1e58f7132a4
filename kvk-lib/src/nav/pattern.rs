//! Path normalization and `:param` pattern matching.

use std::collections::HashMap;

/// Strips the query string, fragment and trailing slashes from a path.
///
/// The root path `/` is kept as is.
pub fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}

/// Matches `path` against a pattern such as `/projects/cfld/:id`.
///
/// Every literal segment must be equal and every `:name` segment matches one
/// non-empty segment. Returns the captured parameters on success.
pub fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    let mut params = HashMap::new();

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(params),
            (Some(pat), Some(seg)) => {
                if let Some(name) = pat.strip_prefix(':') {
                    if seg.is_empty() {
                        return None;
                    }
                    params.insert(name.to_string(), seg.to_string());
                } else if pat != seg {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

/// Returns `true` if `path` lies strictly below `base` (`base + "/"` prefix).
///
/// The root route `/` has no nested paths: `/` followed by `/` never occurs
/// in a normalized path.
pub fn is_nested_under(base: &str, path: &str) -> bool {
    path.strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|rest| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/forms/about-kvk/"), "/forms/about-kvk");
        assert_eq!(normalize("/projects/cfld?page=2"), "/projects/cfld");
        assert_eq!(normalize("/projects/cfld/#top"), "/projects/cfld");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("//"), "/");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_match_pattern_captures() {
        let params = match_pattern("/projects/cfld/:id", "/projects/cfld/17").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("17"));

        let params = match_pattern("/all-master/:kind/:id/edit", "/all-master/zone/4/edit").unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params["kind"], "zone");
    }

    #[test]
    fn test_match_pattern_rejects() {
        assert!(match_pattern("/projects/cfld/:id", "/projects/cfld").is_none());
        assert!(match_pattern("/projects/cfld/:id", "/projects/cfld/1/x").is_none());
        assert!(match_pattern("/projects/cfld/:id", "/projects/cra/1").is_none());
        assert!(match_pattern("/projects/cfld/:id", "/projects/cfld/").is_none());
    }

    #[test]
    fn test_is_nested_under() {
        assert!(is_nested_under("/forms/about-kvk", "/forms/about-kvk/vehicles"));
        assert!(is_nested_under("/forms/about-kvk", "/forms/about-kvk/vehicles/9/edit"));
        assert!(!is_nested_under("/forms/about-kvk", "/forms/about-kvk"));
        assert!(!is_nested_under("/forms/about", "/forms/about-kvk/vehicles"));
        assert!(!is_nested_under("/", "/forms"));
        assert!(!is_nested_under("/", "/unregistered/page"));
    }
}
