/// Trait for parsing the player API's textual scalar values
pub trait SpotifyValueParser {
    /// Parse a millisecond count, defaulting to 0 if parsing fails
    fn parse_millis(s: &str) -> u64 {
        s.parse::<u64>().unwrap_or(0)
    }

    /// Parse a boolean string, treating "true" (case-sensitive) as true
    fn parse_bool(s: &str) -> bool {
        s == "true"
    }
}

/// Implement the parser for common types
impl SpotifyValueParser for str {}
