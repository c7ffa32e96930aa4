use regex::Regex;
use std::sync::OnceLock;

fn hashtag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"#(\w+)").expect("Regex should compile"))
}

fn mention_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"@(\w+)").expect("Regex should compile"))
}

/// Lowercased hashtags found in content, deduplicated, first occurrence first.
pub fn extract_hashtags(content: &str) -> Vec<String> {
    let mut tags = Vec::new();
    for caps in hashtag_regex().captures_iter(content) {
        let tag = caps[1].to_lowercase();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// @mention tokens found in content, case preserved, deduplicated,
/// first occurrence first. Matching against usernames happens at read time.
pub fn extract_mentions(content: &str) -> Vec<String> {
    let mut mentions = Vec::new();
    for caps in mention_regex().captures_iter(content) {
        let name = caps[1].to_string();
        if !mentions.contains(&name) {
            mentions.push(name);
        }
    }
    mentions
}
