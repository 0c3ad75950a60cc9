//! Error taxonomies for parsing and rendering.
//!
//! Each is a small closed enumeration (spec §7): errors are returned, never
//! thrown, and carry enough context (a `Position` or a `node_id`) for a
//! caller to point a user at the defect. Internal invariant violations — the
//! router being asked to draw upward, for instance — are programmer errors
//! and abort via `assert!`/`debug_assert!` rather than a `Result` variant.

use std::fmt;

use crate::canvas::Position;

/// A closed enumeration of ways a drawing can fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorCode {
    UnexpectedGlyph,
    DanglingEdge,
    AmbiguousLabel,
}

impl fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseErrorCode::UnexpectedGlyph => "unexpected glyph",
            ParseErrorCode::DanglingEdge => "dangling edge",
            ParseErrorCode::AmbiguousLabel => "ambiguous label",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("{code} at {position}: {message}")]
pub struct ParseError {
    pub code: ParseErrorCode,
    pub message: String,
    pub position: Position,
}

impl ParseError {
    pub fn new(code: ParseErrorCode, message: impl Into<String>, position: Position) -> Self {
        Self {
            code,
            message: message.into(),
            position,
        }
    }
}

/// A closed enumeration of ways a DAG can fail to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderErrorCode {
    EdgeRoutingFailed,
    LayoutTooNarrow,
    CycleDetected,
}

impl fmt::Display for RenderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RenderErrorCode::EdgeRoutingFailed => "edge routing failed",
            RenderErrorCode::LayoutTooNarrow => "layout too narrow",
            RenderErrorCode::CycleDetected => "cycle detected",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("{code} at node {node_id}: {message}")]
pub struct RenderError {
    pub code: RenderErrorCode,
    pub message: String,
    pub node_id: usize,
}

impl RenderError {
    pub fn new(code: RenderErrorCode, message: impl Into<String>, node_id: usize) -> Self {
        Self {
            code,
            message: message.into(),
            node_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_displays_code_position_and_message() {
        let e = ParseError::new(
            ParseErrorCode::DanglingEdge,
            "no predecessor for '|'",
            Position::new(2, 4),
        );
        let s = e.to_string();
        assert!(s.contains("dangling edge"));
        assert!(s.contains("no predecessor"));
    }

    #[test]
    fn render_error_displays_code_node_and_message() {
        let e = RenderError::new(RenderErrorCode::EdgeRoutingFailed, "no path found", 3);
        let s = e.to_string();
        assert!(s.contains("edge routing failed"));
        assert!(s.contains("node 3"));
    }
}
