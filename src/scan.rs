//! Integer tokens, read the way both the seed file and the command line
//! expect them: whitespace separated, optionally signed, fitting an `i32`.

/// Parses a single token. Anything that is not a plain decimal integer, or
/// that overflows an `i32`, is not an integer token.
pub fn parse_integer(token: &str) -> Option<i32> {
    token.parse().ok()
}

/// Yields integer tokens from the start of `text`, stopping at the first
/// token that is not one.
pub fn leading_integers(text: &str) -> impl Iterator<Item = i32> + '_ {
    text.split_whitespace().map_while(parse_integer)
}
