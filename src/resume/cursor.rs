//! Traversal cursor types and their line-oriented text encoding
//!
//! Each provider owns at most one cursor record in the resume file. The
//! format is deliberately human-readable so a paused run can be inspected
//! (or reset by deleting the file):
//!
//! ```text
//! radarr,0
//! sonarr,series,12,season,3,episode,0
//! ```

use super::store::ResumeError;

/// Cursor for a flat (movie-like) provider.
///
/// `top` is the index of the next top-level item to visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlatCursor {
    /// Next top-level index to visit
    pub top: usize,
}

/// Cursor for a nested (series-like) provider.
///
/// Every field stores the next index to visit at its level. `group` and
/// `leaf` are reset to zero when their sweep over the current top item
/// completes, and only then does `top` advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NestedCursor {
    /// Next top-level (series) index to visit
    pub top: usize,
    /// Next group (season) index to visit within the current series
    pub group: usize,
    /// Next leaf (episode) index to visit within the current series
    pub leaf: usize,
}

/// A persisted traversal position for one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeCursor {
    /// Single-level position
    Flat(FlatCursor),
    /// Three-level position
    Nested(NestedCursor),
}

impl ResumeCursor {
    /// Encode as one resume-file line (without trailing newline).
    pub fn encode(&self, tag: &str) -> String {
        match self {
            ResumeCursor::Flat(c) => format!("{tag},{}", c.top),
            ResumeCursor::Nested(c) => format!(
                "{tag},series,{},season,{},episode,{}",
                c.top, c.group, c.leaf
            ),
        }
    }

    /// Parse one resume-file line into a `(tag, cursor)` pair.
    ///
    /// The shape of the line decides the cursor kind: two fields for flat,
    /// seven fields with the `series`/`season`/`episode` markers for nested.
    /// Anything else is treated as corruption.
    pub fn parse_line(line: &str) -> Result<(String, ResumeCursor), ResumeError> {
        let corrupt = || ResumeError::Corrupt {
            line: line.to_string(),
        };
        let fields: Vec<&str> = line.trim().split(',').collect();
        match fields.as_slice() {
            [tag, top] if !tag.is_empty() => {
                let top = top.parse().map_err(|_| corrupt())?;
                Ok(((*tag).to_string(), ResumeCursor::Flat(FlatCursor { top })))
            }
            [tag, "series", top, "season", group, "episode", leaf] if !tag.is_empty() => {
                let cursor = NestedCursor {
                    top: top.parse().map_err(|_| corrupt())?,
                    group: group.parse().map_err(|_| corrupt())?,
                    leaf: leaf.parse().map_err(|_| corrupt())?,
                };
                Ok(((*tag).to_string(), ResumeCursor::Nested(cursor)))
            }
            _ => Err(corrupt()),
        }
    }
}

impl From<FlatCursor> for ResumeCursor {
    fn from(c: FlatCursor) -> Self {
        ResumeCursor::Flat(c)
    }
}

impl From<NestedCursor> for ResumeCursor {
    fn from(c: NestedCursor) -> Self {
        ResumeCursor::Nested(c)
    }
}
