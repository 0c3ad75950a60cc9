//! Layout tunables.
//!
//! Fills the `crate::config::RenderConfig` reference the teacher's
//! `layout::mod` leaves dangling; values default to the constants implied by
//! the layout-to-canvas rules.

/// Knobs for the layout-to-canvas stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Minimum number of blank columns between adjacent entities in a layer.
    pub min_col_gap: usize,
    /// Floor on the number of rows reserved between two layers, even when no
    /// edge in the upper layer drifts horizontally.
    pub min_row_gap: usize,
    /// Whether `render_dag` appends a trailing newline to its output.
    pub trailing_newline: bool,
    /// Upper bound on canvas width a caller is willing to accept. `None`
    /// (the default) leaves the canvas free to grow to whatever the widest
    /// layer needs, respecting only `min_col_gap`. When set, a layer whose
    /// entities cannot all fit within it while honoring `min_col_gap` fails
    /// layout with `RenderErrorCode::LayoutTooNarrow` instead of silently
    /// growing the canvas.
    pub max_width: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            min_col_gap: 1,
            min_row_gap: 1,
            trailing_newline: false,
            max_width: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_layout_rules() {
        let c = RenderConfig::default();
        assert_eq!(c.min_col_gap, 1);
        assert_eq!(c.min_row_gap, 1);
        assert!(!c.trailing_newline);
        assert_eq!(c.max_width, None);
    }
}
