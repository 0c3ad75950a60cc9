//! Command-line driver: uninteresting glue around the library (spec §1).
//! Mirrors the teacher's `clap`-derive `Cli` struct and stdin/file/stdout
//! plumbing.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;

use dag_ascii::{parse_dag, render_dag, to_dot, Dag, ParseError, RenderError};

/// Errors the driver itself can hit, on top of the library's own. Each
/// variant maps to a distinct process exit code in [`main`].
#[derive(Debug, Error)]
enum CliError {
    #[error("error reading input: {0}")]
    Io(#[from] io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Io(_) => 1,
            CliError::Parse(_) => 2,
            CliError::Render(_) => 3,
        }
    }
}

#[derive(Parser)]
#[command(name = "dag-ascii", about = "Render DAGs as ASCII art, and parse them back")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a line-oriented edge list as an ASCII drawing.
    Render {
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Parse an ASCII drawing back into an edge list.
    Parse {
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Parse an edge list and emit a Graphviz DOT graph.
    Dot {
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// The CLI's own minimal DAG-construction format: `label1 -> label2` per
/// edge, or a bare `label` line for an isolated node. Defined here, not in
/// the library — spec.md treats the driver as uninteresting glue and leaves
/// input-format choice to it.
fn parse_edge_list(text: &str) -> Dag {
    let mut dag = Dag::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();
    let mut node_id = |dag: &mut Dag, index_of: &mut HashMap<String, usize>, label: &str| -> usize {
        *index_of
            .entry(label.to_string())
            .or_insert_with(|| dag.add_node(label))
    };

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((from, to)) = line.split_once("->") {
            let from_id = node_id(&mut dag, &mut index_of, from.trim());
            let to_id = node_id(&mut dag, &mut index_of, to.trim());
            dag.add_edge(from_id, to_id);
        } else {
            node_id(&mut dag, &mut index_of, line);
        }
    }
    dag
}

fn dag_to_edge_list(dag: &Dag) -> String {
    let mut out = String::new();
    for (i, node) in dag.nodes().iter().enumerate() {
        if dag.successors(i).is_empty() && !dag.edges().any(|(_, to)| to == i) {
            out.push_str(&node.label);
            out.push('\n');
        }
    }
    for (from, to) in dag.edges() {
        out.push_str(dag.label(from));
        out.push_str(" -> ");
        out.push_str(dag.label(to));
        out.push('\n');
    }
    out
}

fn read_input(input: &Option<String>) -> io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(output: &Option<String>, text: &str) -> io::Result<()> {
    match output {
        Some(path) => fs::write(path, text),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Render { input, output } => {
            let text = read_input(&input)?;
            let dag = parse_edge_list(&text);
            let rendered = render_dag(&dag)?;
            write_output(&output, &rendered)?;
        }
        Command::Parse { input, output } => {
            let text = read_input(&input)?;
            let dag = parse_dag(&text)?;
            write_output(&output, &dag_to_edge_list(&dag))?;
        }
        Command::Dot { input, output } => {
            let text = read_input(&input)?;
            let dag = parse_edge_list(&text);
            write_output(&output, &to_dot(&dag))?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
