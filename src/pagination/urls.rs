/// Append a page parameter, using & or ? depending on existing params
pub fn with_page_param(base_url: &str, page: usize) -> String {
    let separator = determine_separator(base_url);
    format!("{}{}page={}", base_url, separator, page)
}

fn determine_separator(url: &str) -> char {
    if url.contains('?') { '&' } else { '?' }
}
