//! Parser — a single pass over an ASCII drawing that reconstructs a `Dag`.
//!
//! Grounded on the teacher's `parsers::base::Cursor` (a stateful scanner with
//! explicit helper state) but restructured around the per-column
//! predecessor-map dispatch table rather than a token grammar: each
//! character updates `prev_cols`/`cur_cols`, the column-indexed record of
//! which entity currently "owns" an incoming edge-end at that column.

use std::collections::{HashMap, HashSet};

use crate::canvas::Position;
use crate::dag::Dag;
use crate::errors::{ParseError, ParseErrorCode};

type ColMap = HashMap<usize, Vec<usize>>;

struct ParserState {
    dag: Dag,
    prev_cols: ColMap,
    cur_cols: ColMap,
    partial_label: String,
    label_start_col: usize,
    line: usize,
    col: usize,
}

impl ParserState {
    fn new() -> Self {
        Self {
            dag: Dag::new(),
            prev_cols: ColMap::new(),
            cur_cols: ColMap::new(),
            partial_label: String::new(),
            label_start_col: 0,
            line: 0,
            col: 0,
        }
    }

    fn pos(&self) -> Position {
        Position::new(self.line, self.col)
    }

    /// Finalize any pending label as a node. `end_col_exclusive` is one past
    /// the label's last occupied column.
    fn finalize_label(&mut self, end_col_exclusive: usize) -> Result<(), ParseError> {
        if self.partial_label.is_empty() {
            return Ok(());
        }
        let label = std::mem::take(&mut self.partial_label);
        let id = self.dag.add_node(label);

        let mut seen = HashSet::new();
        for c in self.label_start_col..end_col_exclusive {
            if let Some(preds) = self.prev_cols.get(&c) {
                for &p in preds {
                    if seen.insert(p) {
                        self.dag.add_edge(p, id);
                    }
                }
            }
        }

        for c in self.label_start_col..end_col_exclusive {
            if self.cur_cols.contains_key(&c) {
                return Err(ParseError::new(
                    ParseErrorCode::AmbiguousLabel,
                    format!("label '{}' overlaps an entity already claiming column {}", self.dag.label(id), c),
                    Position::new(self.line, c),
                ));
            }
            self.cur_cols.entry(c).or_default().push(id);
        }
        Ok(())
    }

    fn require_prev(&self, col: usize, code: ParseErrorCode, glyph: char) -> Result<Vec<usize>, ParseError> {
        match self.prev_cols.get(&col) {
            Some(ids) if !ids.is_empty() => Ok(ids.clone()),
            _ => Err(ParseError::new(
                code,
                format!("'{}' has no predecessor at column {}", glyph, col),
                self.pos(),
            )),
        }
    }

    fn newline(&mut self) -> Result<(), ParseError> {
        self.finalize_label(self.col + 1)?;
        self.prev_cols = std::mem::take(&mut self.cur_cols);
        self.col = 0;
        self.line += 1;
        Ok(())
    }

    fn dispatch(&mut self, ch: char) -> Result<(), ParseError> {
        self.col += 1;
        match ch {
            ' ' => self.finalize_label(self.col),
            '|' => {
                let preds = self.require_prev(self.col, ParseErrorCode::DanglingEdge, '|')?;
                self.cur_cols.entry(self.col).or_default().extend(preds);
                Ok(())
            }
            '\\' => {
                let from_col = self.col.saturating_sub(1);
                let preds = self.require_prev(from_col, ParseErrorCode::DanglingEdge, '\\')?;
                self.cur_cols.entry(self.col + 1).or_default().extend(preds);
                Ok(())
            }
            '/' => {
                let preds = self.require_prev(self.col + 1, ParseErrorCode::UnexpectedGlyph, '/')?;
                self.cur_cols.entry(self.col.saturating_sub(1)).or_default().extend(preds);
                Ok(())
            }
            'X' => {
                let left_preds = self.require_prev(self.col + 1, ParseErrorCode::UnexpectedGlyph, 'X')?;
                let from_col = self.col.saturating_sub(1);
                let right_preds = self.require_prev(from_col, ParseErrorCode::UnexpectedGlyph, 'X')?;
                self.cur_cols.entry(self.col.saturating_sub(1)).or_default().extend(left_preds);
                self.cur_cols.entry(self.col + 1).or_default().extend(right_preds);
                Ok(())
            }
            other => {
                if self.partial_label.is_empty() {
                    self.label_start_col = self.col;
                }
                self.partial_label.push(other);
                Ok(())
            }
        }
    }
}

/// Parse an ASCII drawing into a `Dag`.
pub fn parse_dag(text: &str) -> Result<Dag, ParseError> {
    log::debug!("parsing drawing of {} bytes", text.len());
    let mut state = ParserState::new();
    for ch in text.chars() {
        if ch == '\n' {
            state.newline()?;
        } else {
            state.dispatch(ch)?;
        }
    }
    state.finalize_label(state.col + 1)?;
    Ok(state.dag)
}
