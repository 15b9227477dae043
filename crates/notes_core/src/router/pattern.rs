//! Route patterns with `:name` dynamic segments.

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static DYNAMIC_SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([^/]+)").expect("valid dynamic segment regex"));

/// Values captured by the most recent dynamic route match, keyed by
/// segment name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One registered path pattern, e.g. `/note/:id`.
///
/// Each dynamic segment matches a non-empty run of characters other than
/// `/`. Literal parts match exactly.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    names: Vec<String>,
    matcher: Option<Regex>,
}

impl RoutePattern {
    pub fn parse(source: &str) -> Self {
        let names: Vec<String> = DYNAMIC_SEGMENT_RE
            .captures_iter(source)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect();
        let matcher = if names.is_empty() {
            None
        } else {
            compile_matcher(source)
        };

        Self {
            source: source.to_string(),
            names,
            matcher,
        }
    }

    /// The literal registration string.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_dynamic(&self) -> bool {
        self.matcher.is_some()
    }

    /// Matches `path` against the dynamic form of this pattern.
    ///
    /// Literal-only patterns never match here; they are looked up by exact
    /// string before dynamic matching runs.
    pub fn captures(&self, path: &str) -> Option<RouteParams> {
        let caps = self.matcher.as_ref()?.captures(path)?;
        Some(
            self.names
                .iter()
                .enumerate()
                .filter_map(|(index, name)| {
                    caps.get(index + 1)
                        .map(|value| (name.clone(), value.as_str().to_string()))
                })
                .collect(),
        )
    }
}

fn compile_matcher(source: &str) -> Option<Regex> {
    let mut expr = String::from("^");
    let mut last = 0;
    for segment in DYNAMIC_SEGMENT_RE.find_iter(source) {
        expr.push_str(&regex::escape(&source[last..segment.start()]));
        expr.push_str("([^/]+)");
        last = segment.end();
    }
    expr.push_str(&regex::escape(&source[last..]));
    expr.push('$');

    match Regex::new(&expr) {
        Ok(matcher) => Some(matcher),
        Err(err) => {
            warn!("event=route_register module=router status=error error_code=pattern_compile_failed error={err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RoutePattern;

    #[test]
    fn literal_pattern_is_not_dynamic() {
        let pattern = RoutePattern::parse("/create");
        assert!(!pattern.is_dynamic());
        assert!(pattern.captures("/create").is_none());
    }

    #[test]
    fn dynamic_segment_captures_by_name() {
        let pattern = RoutePattern::parse("/note/:id");
        let params = pattern.captures("/note/42").expect("should match");
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn dynamic_segment_does_not_span_separators_or_match_empty() {
        let pattern = RoutePattern::parse("/note/:id");
        assert!(pattern.captures("/note/4/2").is_none());
        assert!(pattern.captures("/note/").is_none());
        assert!(pattern.captures("/notes/42").is_none());
    }

    #[test]
    fn literal_parts_are_not_regex() {
        let pattern = RoutePattern::parse("/a.b/:id");
        assert!(pattern.captures("/a.b/1").is_some());
        assert!(pattern.captures("/axb/1").is_none());
    }

    #[test]
    fn multiple_segments_capture_positionally_under_their_names() {
        let pattern = RoutePattern::parse("/board/:board/card/:card");
        let params = pattern.captures("/board/b1/card/c9").expect("should match");
        assert_eq!(params.get("board"), Some("b1"));
        assert_eq!(params.get("card"), Some("c9"));
    }
}
