/*
    Cleans release names of copied files: drops bracketed and parenthesized
    annotations and release tags, and normalizes separators and case.
*/

/// Release tags removed from names, in removal order. Matching happens after
/// lowercasing, so the entries with upper case letters (and the one with a
/// space) never match.
pub const BLACKLIST: [&str; 10] = [
    "webrip",
    "blueray",
    "regraded",
    "web dl",
    "rarbg",
    "1080p",
    "720p",
    "AMZN",
    "WEB_DL",
    "web_rip",
];

pub fn sanitize(name: &str) -> String {
    let name = strip_spans(name, '[', ']');
    let name = name.replace('-', "_").replace(' ', "_").to_lowercase();
    let name = remove_blacklisted(&name);
    let name = strip_spans(&name, '(', ')');

    collapse_whitespace(&name)
}

/* Removes every `open ... close` span, first one first. An opener without closer is kept */
pub fn strip_spans(name: &str, open: char, close: char) -> String {
    let mut name = name.to_string();

    loop {
        let start = match name.find(open) {
            Some(i) => i,
            None => break,
        };
        let end = match name[start..].find(close) {
            Some(i) => start + i,
            None => break,
        };

        name.replace_range(start..end + close.len_utf8(), "");
    }

    name
}

/* Each entry is removed in a single pass, in list order */
pub fn remove_blacklisted(name: &str) -> String {
    BLACKLIST
        .iter()
        .fold(name.to_string(), |name, word| name.replace(word, ""))
}

pub fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<&str>>().join(" ")
}
