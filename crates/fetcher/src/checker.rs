//! Keyword checker: visible-text extraction and substring matching.

use scraper::{Html, Node};

/// Elements whose text content is never rendered.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Concatenate the text nodes of `html`, skipping non-rendered elements.
///
/// Entities are decoded by the parser, so `&amp;` yields `&`. Plain text
/// bodies pass through unchanged.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });

        if !hidden {
            text.push_str(fragment);
        }
    }

    text
}

/// Case-sensitive test for `keyword` in the visible text of `html`.
pub fn contains_keyword(html: &str, keyword: &str) -> bool {
    visible_text(html).contains(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_in_body() {
        let html = "<html><body><h1>Status</h1><p>All systems OK</p></body></html>";
        assert!(contains_keyword(html, "OK"));
        assert!(contains_keyword(html, "systems OK"));
    }

    #[test]
    fn test_keyword_is_case_sensitive() {
        let html = "<p>all systems ok</p>";
        assert!(!contains_keyword(html, "OK"));
    }

    #[test]
    fn test_markup_is_not_text() {
        let html = r#"<div class="OK">nothing here</div>"#;
        assert!(!contains_keyword(html, "OK"));
    }

    #[test]
    fn test_script_and_style_are_ignored() {
        let html = r#"<html><head><style>.OK { color: red }</style>
            <script>var status = "OK";</script></head>
            <body><p>down</p></body></html>"#;
        assert!(!contains_keyword(html, "OK"));
        assert!(visible_text(html).contains("down"));
    }

    #[test]
    fn test_text_spans_inline_elements() {
        let html = "<p>In <b>stock</b> now</p>";
        assert!(contains_keyword(html, "In stock now"));
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = "<p>Fish &amp; Chips</p>";
        assert!(contains_keyword(html, "Fish & Chips"));
    }

    #[test]
    fn test_plain_text_body() {
        assert!(contains_keyword("service OK", "OK"));
        assert!(!contains_keyword("", "OK"));
    }
}
