//! Query-match highlighting for result fields.
//!
//! The item template renders titles and descriptions with the substrings
//! matching the current query wrapped for visual emphasis. The hosted service
//! usually supplies pre-highlighted values with the response; when it does
//! not, matches are found locally. Either way the output is markup-safe: raw
//! field text is always HTML-escaped, so a hit field can never inject markup.

use blogsearch_core::{Hit, HitField};

/// Emphasis tag used by the service in pre-highlighted values.
const SERVICE_TAG: &str = "em";

/// Tags wrapped around matching substrings in highlighted output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightFormat {
    /// Opening tag.
    pub open: String,

    /// Closing tag.
    pub close: String,
}

impl Default for HighlightFormat {
    fn default() -> Self {
        Self {
            open: "<mark>".to_string(),
            close: "</mark>".to_string(),
        }
    }
}

/// Capability for turning a hit field into markup-safe highlighted HTML.
pub trait Highlighter {
    /// Highlighted, markup-safe HTML for one field of a hit.
    fn highlight(&self, hit: &Hit, field: HitField) -> String;
}

/// Highlighter for the query a response was produced from.
#[derive(Debug, Clone)]
pub struct QueryHighlighter {
    terms: Vec<String>,
    format: HighlightFormat,
}

impl QueryHighlighter {
    /// Build a highlighter for a query string.
    pub fn new(query: &str) -> Self {
        Self {
            terms: tokenize_query(query),
            format: HighlightFormat::default(),
        }
    }

    /// Override the emphasis tags.
    pub fn with_format(mut self, format: HighlightFormat) -> Self {
        self.format = format;
        self
    }

    /// The normalized query terms being highlighted.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl Highlighter for QueryHighlighter {
    fn highlight(&self, hit: &Hit, field: HitField) -> String {
        match hit.highlighted(field) {
            Some(pre) => normalize_service_markup(pre, &self.format),
            None => highlight_terms(hit.field(field), &self.terms, &self.format),
        }
    }
}

/// Tokenize a query string into normalized terms.
fn tokenize_query(query: &str) -> Vec<String> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| s.len() >= 2) // Skip single characters
        .map(|s| s.to_lowercase())
        .collect()
}

/// Escape text for inclusion in an HTML fragment.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape raw text and wrap query-term matches in the emphasis tags.
pub fn highlight_terms(text: &str, terms: &[String], format: &HighlightFormat) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some((start, end)) = find_term(rest, terms) {
        out.push_str(&escape_html(&rest[..start]));
        out.push_str(&format.open);
        out.push_str(&escape_html(&rest[start..end]));
        out.push_str(&format.close);
        rest = &rest[end..];
    }

    out.push_str(&escape_html(rest));
    out
}

/// Re-escape a service-highlighted value, keeping only its emphasis tags.
fn normalize_service_markup(value: &str, format: &HighlightFormat) -> String {
    let escaped = escape_html(value);
    escaped
        .replace(&format!("&lt;{SERVICE_TAG}&gt;"), &format.open)
        .replace(&format!("&lt;/{SERVICE_TAG}&gt;"), &format.close)
}

/// Earliest match of any term in the text, longest match winning ties.
fn find_term(text: &str, terms: &[String]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;

    for term in terms {
        if let Some(pos) = find_ignore_ascii_case(text, term) {
            let candidate = (pos, pos + term.len());
            let better = match best {
                None => true,
                Some((s, e)) => candidate.0 < s || (candidate.0 == s && candidate.1 > e),
            };
            if better {
                best = Some(candidate);
            }
        }
    }

    best
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();

    if n.is_empty() || h.len() < n.len() {
        return None;
    }

    (0..=h.len() - n.len())
        .find(|&i| haystack.is_char_boundary(i) && h[i..i + n.len()].eq_ignore_ascii_case(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(query: &str, text: &str) -> String {
        highlight_terms(text, &tokenize_query(query), &HighlightFormat::default())
    }

    #[test]
    fn test_tokenize_query() {
        assert_eq!(tokenize_query("Hello, World"), vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_filters_short() {
        // Single characters are skipped
        assert_eq!(tokenize_query("a rust b"), vec!["rust"]);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_highlight_basic() {
        assert_eq!(mark("hello", "Say Hello there"), "Say <mark>Hello</mark> there");
    }

    #[test]
    fn test_highlight_case_insensitive() {
        assert_eq!(mark("RUST", "rust and Rust"), "<mark>rust</mark> and <mark>Rust</mark>");
    }

    #[test]
    fn test_highlight_no_match() {
        assert_eq!(mark("python", "rust only"), "rust only");
    }

    #[test]
    fn test_highlight_escapes_unmatched_text() {
        assert_eq!(
            mark("hello", "<i>hello</i>"),
            "&lt;i&gt;<mark>hello</mark>&lt;/i&gt;"
        );
    }

    #[test]
    fn test_highlight_empty_query() {
        assert_eq!(mark("", "plain text"), "plain text");
    }

    #[test]
    fn test_normalize_service_markup() {
        let format = HighlightFormat::default();
        assert_eq!(
            normalize_service_markup("<em>Hello</em> world", &format),
            "<mark>Hello</mark> world"
        );
    }

    #[test]
    fn test_normalize_service_markup_escapes_other_tags() {
        let format = HighlightFormat::default();
        assert_eq!(
            normalize_service_markup("<script>x</script><em>y</em>", &format),
            "&lt;script&gt;x&lt;/script&gt;<mark>y</mark>"
        );
    }

    #[test]
    fn test_highlighter_prefers_service_value() {
        let mut hit = blogsearch_core::Hit::new("Hello", "World", "/p/1");
        hit.highlight = Some(blogsearch_core::HitHighlight {
            title: Some("<em>Hello</em>".to_string()),
            desc: None,
        });

        let highlighter = QueryHighlighter::new("hello");
        assert_eq!(
            highlighter.highlight(&hit, HitField::Title),
            "<mark>Hello</mark>"
        );
        // desc has no service value, so matches are found locally
        assert_eq!(highlighter.highlight(&hit, HitField::Desc), "World");
    }

    #[test]
    fn test_highlighter_local_fallback() {
        let hit = blogsearch_core::Hit::new("Learning Rust", "A Rust guide", "/p/1");
        let highlighter = QueryHighlighter::new("rust");

        assert_eq!(
            highlighter.highlight(&hit, HitField::Title),
            "Learning <mark>Rust</mark>"
        );
        assert_eq!(
            highlighter.highlight(&hit, HitField::Desc),
            "A <mark>Rust</mark> guide"
        );
    }

    #[test]
    fn test_custom_format() {
        let format = HighlightFormat {
            open: "<em>".to_string(),
            close: "</em>".to_string(),
        };
        let hit = blogsearch_core::Hit::new("Hello", "", "/p/1");
        let highlighter = QueryHighlighter::new("hello").with_format(format);

        assert_eq!(
            highlighter.highlight(&hit, HitField::Title),
            "<em>Hello</em>"
        );
    }

    #[test]
    fn test_longest_match_wins_ties() {
        // "rustacean" and "rust" both match at the same offset
        let terms = vec!["rust".to_string(), "rustacean".to_string()];
        let out = highlight_terms("rustaceans", &terms, &HighlightFormat::default());
        assert_eq!(out, "<mark>rustacean</mark>s");
    }
}
