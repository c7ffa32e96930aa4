/// Maximum post/quote content length, in characters.
pub const MAX_POST_CHARS: usize = 280;

/// How many hashtags the trending ranking returns.
pub const TRENDING_LIMIT: usize = 10;

pub fn bind_addr() -> String {
    std::env::var("ROOST_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string())
}
