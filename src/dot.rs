//! DOT emitter — an external collaborator, not part of the core pipeline
//! (spec §4.7). Escaping style grounded on the teacher's quoted-string
//! handling, adapted to DOT's escape set.

use std::fmt::Write as _;

use crate::dag::Dag;

fn escape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for ch in label.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Emit `dag` as a Graphviz `digraph` block.
pub fn to_dot(dag: &Dag) -> String {
    let mut out = String::new();
    writeln!(out, "digraph \"DAG\" {{").unwrap();
    for (i, node) in dag.nodes().iter().enumerate() {
        writeln!(out, "  n{}[shape=record,label=\"{}\"];", i, escape_label(&node.label)).unwrap();
    }
    for (from, to) in dag.edges() {
        writeln!(out, "  n{} -> n{};", from, to).unwrap();
    }
    out.push('}');
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_nodes_and_edges() {
        let mut d = Dag::new();
        let a = d.add_node("a");
        let b = d.add_node("b");
        d.add_edge(a, b);
        let dot = to_dot(&d);
        assert!(dot.starts_with("digraph \"DAG\" {"));
        assert!(dot.contains("n0[shape=record,label=\"a\"];"));
        assert!(dot.contains("n1[shape=record,label=\"b\"];"));
        assert!(dot.contains("n0 -> n1;"));
    }

    #[test]
    fn escapes_quotes_braces_and_newlines() {
        let mut d = Dag::new();
        d.add_node("a\"b{c}d\ne");
        let dot = to_dot(&d);
        assert!(dot.contains("a\\\"b\\{c\\}d\\ne"));
    }
}
