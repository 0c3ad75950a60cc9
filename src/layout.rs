//! Layout-to-canvas — maps ordered, layered entities onto canvas positions
//! and routes every edge.
//!
//! Grounded on the teacher's `assign_coordinates_rust` (per-layer column
//! placement with gap reservation), generalized from its fixed `h_gap`/
//! `v_gap` constants to the data-dependent `G_k` row-gap rule.

use crate::canvas::{Canvas, Direction, Position};
use crate::config::RenderConfig;
use crate::dag::Dag;
use crate::errors::{RenderError, RenderErrorCode};
use crate::layering::{Entity, LayeredDag};
use crate::router;

/// Canvas plus the position of every entity, keyed by entity id.
#[derive(Debug)]
pub struct LayoutResult {
    pub canvas: Canvas,
    pub label_positions: Vec<Option<Position>>,
    pub anchor_positions: Vec<Position>,
}

fn label_width(dag: &Dag, entity: Entity) -> usize {
    match entity {
        Entity::Real(n) => dag.label(n).chars().count().max(1),
        Entity::Waypoint => 1,
    }
}

/// The entity's originating real node, walking back through waypoint
/// chains. Used to attribute a routing failure to a `node_id` a caller can
/// point at.
fn originating_node(layered: &LayeredDag, entity: usize) -> usize {
    match layered.entities[entity] {
        Entity::Real(n) => n,
        Entity::Waypoint => layered
            .edges
            .iter()
            .find(|&&(_, to)| to == entity)
            .map(|&(from, _)| originating_node(layered, from))
            .unwrap_or(entity),
    }
}

/// Place every entity left-to-right within its layer. Fails with
/// `(layer_index, first_offending_entity)` if a layer's required width
/// (label widths plus `min_col_gap` between them) would exceed
/// `config.max_width`.
fn assign_columns(
    dag: &Dag,
    layered: &LayeredDag,
    config: &RenderConfig,
) -> Result<(Vec<usize>, Vec<usize>, usize), (usize, usize)> {
    let mut first_col = vec![0usize; layered.entities.len()];
    let mut anchor_col = vec![0usize; layered.entities.len()];
    let mut max_width = 0;

    for (k, layer) in layered.layers.iter().enumerate() {
        let mut cursor = 0usize;
        for (i, &id) in layer.iter().enumerate() {
            let width = label_width(dag, layered.entities[id]);
            first_col[id] = cursor;
            anchor_col[id] = cursor + (width - 1) / 2;
            cursor += width;
            if i + 1 < layer.len() {
                cursor += config.min_col_gap;
            }
            if let Some(bound) = config.max_width {
                if cursor > bound {
                    return Err((k, id));
                }
            }
        }
        max_width = max_width.max(cursor);
    }

    Ok((first_col, anchor_col, max_width))
}

fn row_gap(layered: &LayeredDag, anchor_col: &[usize], layer: usize, config: &RenderConfig) -> usize {
    let drift = layered
        .edges
        .iter()
        .filter(|&&(from, _)| layered.layer_of[from] == layer)
        .map(|&(from, to)| anchor_col[to].abs_diff(anchor_col[from]))
        .max()
        .unwrap_or(0);
    drift.max(config.min_row_gap)
}

/// Place every entity, paint node labels, and route every edge in
/// deterministic layer-major, left-to-right order.
pub fn layout_to_canvas(dag: &Dag, layered: &LayeredDag, config: &RenderConfig) -> Result<LayoutResult, RenderError> {
    log::debug!("laying out {} entities across {} layers", layered.entities.len(), layered.layer_count());

    let (first_col, anchor_col, width) = assign_columns(dag, layered, config).map_err(|(layer, id)| {
        RenderError::new(
            RenderErrorCode::LayoutTooNarrow,
            format!("layer {layer} needs more than the configured max_width to honor min_col_gap"),
            originating_node(layered, id),
        )
    })?;

    let mut row_of_layer = vec![0usize; layered.layer_count()];
    let mut cursor_row = 0usize;
    for k in 0..layered.layer_count() {
        row_of_layer[k] = cursor_row;
        cursor_row += 1;
        if k + 1 < layered.layer_count() {
            cursor_row += row_gap(layered, &anchor_col, k, config);
        }
    }
    let height = cursor_row;

    let mut canvas = Canvas::create(height, width, ' ');

    let mut label_positions = vec![None; layered.entities.len()];
    let mut anchor_positions = vec![Position::new(0, 0); layered.entities.len()];
    for (id, &entity) in layered.entities.iter().enumerate() {
        let row = row_of_layer[layered.layer_of[id]];
        anchor_positions[id] = Position::new(row, anchor_col[id]);
        if let Entity::Real(n) = entity {
            let pos = Position::new(row, first_col[id]);
            canvas.write_str(pos, dag.label(n));
            label_positions[id] = Some(pos);
        }
    }

    for k in 0..layered.layer_count() {
        for &from in &layered.layers[k] {
            let mut outgoing: Vec<usize> = layered
                .edges
                .iter()
                .filter(|&&(f, _)| f == from)
                .map(|&(_, to)| to)
                .collect();
            outgoing.sort_by_key(|&to| anchor_col[to]);
            for to in outgoing {
                let from_pos = anchor_positions[from];
                let to_pos = anchor_positions[to];
                let dir = if anchor_col[to] < anchor_col[from] {
                    Direction::Left
                } else if anchor_col[to] > anchor_col[from] {
                    Direction::Right
                } else {
                    Direction::Straight
                };
                if !router::route_edge(&mut canvas, from_pos, dir, to_pos, dir) {
                    return Err(RenderError::new(
                        RenderErrorCode::EdgeRoutingFailed,
                        format!("no path from {} to {}", from_pos, to_pos),
                        originating_node(layered, from),
                    ));
                }
            }
        }
    }

    Ok(LayoutResult {
        canvas,
        label_positions,
        anchor_positions,
    })
}
