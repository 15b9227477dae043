//! Discovery of client-side navigation links in rendered markup.

use once_cell::sync::Lazy;
use regex::Regex;

static START_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[A-Za-z][^>]*>").expect("valid start tag regex"));
static DATA_LINK_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\sdata-link(?:[\s=/>]|$)").expect("valid data-link regex"));
static HREF_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\shref\s*=\s*"([^"]*)""#).expect("valid href regex"));

/// Returns the `href` of every element marked `data-link`, in document
/// order. Elements without an `href` are skipped.
pub fn bound_links(markup: &str) -> Vec<String> {
    START_TAG_RE
        .find_iter(markup)
        .map(|tag| tag.as_str())
        .filter(|tag| DATA_LINK_ATTR_RE.is_match(tag))
        .filter_map(|tag| HREF_ATTR_RE.captures(tag))
        .filter_map(|caps| caps.get(1).map(|href| unescape_attr(href.as_str())))
        .filter(|href| !href.is_empty())
        .collect()
}

fn unescape_attr(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::bound_links;

    #[test]
    fn collects_only_marked_links() {
        let markup = r#"
            <a href="/" data-link>Home</a>
            <a href="https://example.com">out</a>
            <a href="/create" data-link class="btn">New</a>
            <a data-link-extra href="/nope">no</a>
            <span data-link>no href</span>
        "#;
        assert_eq!(bound_links(markup), vec!["/", "/create"]);
    }

    #[test]
    fn attribute_order_and_multiline_tags_are_supported() {
        let markup = "<a\n  data-link\n  class=\"note-item\"\n  href=\"/note/1\">x</a>";
        assert_eq!(bound_links(markup), vec!["/note/1"]);
    }
}
