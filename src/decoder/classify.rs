//! Line shape classification for the boundary decoder
//!
//! Both predicates are pure and look only at the line text. They never try to
//! understand header semantics: a "tag" is anything shaped loosely like a
//! `Name: value` header.

/// Literal prefix that marks a candidate message boundary
pub const BOUNDARY_PREFIX: &str = "From ";

/// A colon before this index disqualifies a tag line
pub const MIN_TAG_LEN: usize = 4;

/// Returns true when the line starts with exactly `"From "` (case-sensitive)
pub fn is_boundary_line(line: &str) -> bool {
    line.starts_with(BOUNDARY_PREFIX)
}

/// Returns true when the line looks like a header tag
///
/// The scan walks characters from the start of the line:
///
/// - a `:` at an index below [`MIN_TAG_LEN`] rejects the line
/// - any character other than an ASCII letter, space, colon or hyphen rejects the line
/// - a space accepts the line, wherever it appears
///
/// Reaching the end of the line without an accepting space rejects it.
///
/// # Examples
///
/// ```
/// use mbox2txt::decoder::is_tag_line;
///
/// assert!(is_tag_line("Subject: hi"));
/// assert!(!is_tag_line("X: a"));
/// ```
pub fn is_tag_line(line: &str) -> bool {
    for (ndx, ch) in line.chars().enumerate() {
        if ch == ':' && ndx < MIN_TAG_LEN {
            return false;
        }

        match ch {
            ' ' => return true,
            c if c.is_ascii_alphabetic() => {}
            ':' | '-' => {}
            _ => return false,
        }
    }

    false
}
