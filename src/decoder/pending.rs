//! In-progress capture of a candidate message start

/// Character offset in the boundary line where the confirmation marker is spliced
pub const MARKER_OFFSET: usize = 4;

/// Marker inserted into a confirmed boundary line (`From x` becomes `From - x`)
pub const BOUNDARY_MARKER: &str = " -";

/// Number of tag lines that must follow a boundary line
pub const TAG_COUNT: usize = 3;

/// A boundary line plus the tag lines captured after it so far
///
/// Every line is copied into owned storage on capture, so the caller's line
/// buffer can be reused for the next read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    boundary: String,
    tags: [Option<String>; TAG_COUNT],
}

impl PendingMessage {
    /// Start a capture from a boundary line; all tag slots are empty
    pub fn new(boundary: &str) -> Self {
        Self { boundary: boundary.to_owned(), tags: Default::default() }
    }

    /// Store a copy of `line` in tag slot `slot` (0-based)
    pub fn capture_tag(&mut self, slot: usize, line: &str) {
        if let Some(tag) = self.tags.get_mut(slot) {
            *tag = Some(line.to_owned());
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Number of tag lines captured so far
    pub fn captured_tags(&self) -> usize {
        self.tags.iter().filter(|t| t.is_some()).count()
    }

    /// Confirm the message and return the lines to emit
    ///
    /// Yields the boundary line with [`BOUNDARY_MARKER`] spliced in at
    /// [`MARKER_OFFSET`], the three tags, and `body_first_line`.
    pub fn finalize(self, body_first_line: &str) -> Vec<String> {
        let mut boundary = self.boundary;
        if boundary.is_char_boundary(MARKER_OFFSET) {
            boundary.insert_str(MARKER_OFFSET, BOUNDARY_MARKER);
        } else {
            boundary.push_str(BOUNDARY_MARKER);
        }

        let mut lines = Vec::with_capacity(TAG_COUNT + 2);
        lines.push(boundary);
        lines.extend(self.tags.into_iter().flatten());
        lines.push(body_first_line.to_owned());
        lines
    }

    /// Give up on the message and return the captured lines untouched
    ///
    /// The boundary line (without the marker) and any captured tags come back
    /// in capture order, followed by `trigger`, the line that broke the sequence.
    pub fn abandon_to_body(self, trigger: &str) -> Vec<String> {
        let mut lines = Vec::with_capacity(TAG_COUNT + 2);
        lines.push(self.boundary);
        lines.extend(self.tags.into_iter().flatten());
        lines.push(trigger.to_owned());
        lines
    }
}
