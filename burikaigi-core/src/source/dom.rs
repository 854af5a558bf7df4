//! Small navigation helpers over `scraper`'s element tree.
//!
//! Every lookup returns an `Option`; absence is handled by the caller with
//! an explicit default, never by aborting the scrape.

use scraper::ElementRef;

/// Next sibling that is an element (skipping text nodes).
pub(crate) fn next_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Parent node, if it is an element.
pub(crate) fn parent_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.parent().and_then(ElementRef::wrap)
}

/// Last child that is an element.
pub(crate) fn last_child_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap).last()
}

/// Number of element children (text nodes don't count).
pub(crate) fn child_element_count(el: ElementRef<'_>) -> usize {
    el.children().filter_map(ElementRef::wrap).count()
}

/// Concatenated text content, trimmed.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Concatenated text content, untrimmed (for description bodies where the
/// caller does its own whitespace handling).
pub(crate) fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}
