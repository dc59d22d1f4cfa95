use scraper::{ElementRef, Node, Selector};

/// Compile a selector that is a string literal in this crate
pub fn css(selector: &str) -> Selector {
    Selector::parse(selector).expect("Valid selector")
}

/// Text of an element split into trimmed, non-empty lines
///
/// Newlines in text nodes and `<br>` elements both end a line; text of
/// nested elements is joined into the line it appears in.
pub fn text_lines(element: ElementRef<'_>) -> Vec<String> {
    let mut text = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(fragment) => text.push_str(fragment),
            Node::Element(tag) if tag.name() == "br" => text.push('\n'),
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Last `/`-separated segment of a link, without query or fragment
pub fn last_path_segment(href: &str) -> &str {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    path.rsplit('/').next().unwrap_or(path)
}
