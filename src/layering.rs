//! Layer assignment — longest-path ranking plus waypoint insertion.
//!
//! Grounded on `nadavrot-layout`'s `adt::dag::DAG::compute_levels` (longest
//! path via relaxation over a topological order) and
//! `recompute_node_ranks`. Cycle detection and the topological order itself
//! are delegated to `petgraph`, mirroring the teacher's
//! `GraphIR::is_dag`/`GraphIR::topological_order`, since `Dag` stays a flat
//! index vector rather than a `petgraph` graph.

use petgraph::algo::toposort;
use petgraph::graph::DiGraph;

use crate::dag::Dag;
use crate::errors::{RenderError, RenderErrorCode};

/// An entity in the layered DAG: either a real node or a synthetic
/// pass-through inserted so every edge spans exactly one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Real(usize),
    Waypoint,
}

/// A DAG whose entities have been bucketed into layers, with every edge
/// spanning exactly one layer via inserted waypoints.
///
/// `layers[k]` lists entity ids assigned to layer `k`, in an order that
/// `crate::ordering` mutates in place; `edges` lists `(from, to)` pairs over
/// entity ids.
#[derive(Debug, Clone)]
pub struct LayeredDag {
    pub entities: Vec<Entity>,
    pub layer_of: Vec<usize>,
    pub layers: Vec<Vec<usize>>,
    pub edges: Vec<(usize, usize)>,
}

impl LayeredDag {
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

/// Compute `rank[n]` = longest-path length from any source, then insert
/// waypoint chains so every edge spans exactly one layer.
pub fn assign_layers(dag: &Dag) -> Result<LayeredDag, RenderError> {
    log::debug!("layering {} nodes", dag.node_count());

    let mut g = DiGraph::<(), ()>::with_capacity(dag.node_count(), 0);
    let indices: Vec<_> = (0..dag.node_count()).map(|_| g.add_node(())).collect();
    for (from, to) in dag.edges() {
        g.add_edge(indices[from], indices[to], ());
    }

    let topo = toposort(&g, None).map_err(|cycle| {
        RenderError::new(
            RenderErrorCode::CycleDetected,
            "layering did not terminate",
            cycle.node_id().index(),
        )
    })?;

    let mut rank = vec![0usize; dag.node_count()];
    for node_idx in topo {
        let u = node_idx.index();
        for &v in dag.successors(u) {
            if rank[v] < rank[u] + 1 {
                rank[v] = rank[u] + 1;
            }
        }
    }

    let mut entities: Vec<Entity> = (0..dag.node_count()).map(Entity::Real).collect();
    let mut layer_of: Vec<usize> = rank.clone();
    let mut edges = Vec::new();

    for (u, v) in dag.edges() {
        let span = rank[v] - rank[u];
        if span == 1 {
            edges.push((u, v));
            continue;
        }
        log::trace!("edge {}->{} spans {} layers, inserting waypoints", u, v, span);
        let mut prev = u;
        for step in 1..span {
            let wp = entities.len();
            entities.push(Entity::Waypoint);
            layer_of.push(rank[u] + step);
            edges.push((prev, wp));
            prev = wp;
        }
        edges.push((prev, v));
    }

    let num_layers = rank.iter().copied().max().map(|m| m + 1).unwrap_or(0);
    let mut layers = vec![Vec::new(); num_layers];
    for (id, &layer) in layer_of.iter().enumerate() {
        layers[layer].push(id);
    }

    Ok(LayeredDag {
        entities,
        layer_of,
        layers,
        edges,
    })
}
