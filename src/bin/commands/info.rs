use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use chain_forge::io::InputFrame;
use chain_forge::ops::{BOND_BUFFER, BondInference};
use chain_forge::{BondGraph, Element};

use crate::commands::{print_boxed_label, run_with_spinner};

/// Report-only command that prints bond-graph statistics without classifying.
#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Slack added to the van der Waals bonding cutoff, in ångströms.
    #[arg(long, value_name = "ANGSTROM", default_value_t = BOND_BUFFER)]
    buffer: f64,
}

pub fn run(frame: &InputFrame, args: &InfoArgs) -> Result<()> {
    let inference = BondInference::new().buffer(args.buffer);
    let graph = run_with_spinner("Building bond graph", || {
        BondGraph::from_frame(frame, &inference).context("Failed to build the bond graph")
    })?;

    print_tables(&graph, frame.has_explicit_bonds())
}

fn print_tables(graph: &BondGraph, explicit_bonds: bool) -> Result<()> {
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, "ChainForge Graph Report")?;
    writeln!(&mut stderr)?;

    let mut element_counts: BTreeMap<Element, usize> = BTreeMap::new();
    for atom in graph.atoms() {
        *element_counts.entry(atom.element).or_default() += 1;
    }

    let mut element_table = Table::new();
    print_boxed_label(&mut stderr, "Elements")?;
    element_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    element_table.set_titles(row!["Element", "Atoms"]);
    for (element, count) in &element_counts {
        element_table.add_row(row![element, count]);
    }
    element_table
        .print(&mut stderr)
        .context("Failed to render element summary")?;
    writeln!(&mut stderr)?;

    let isolated = (0..graph.atom_count())
        .filter(|&a| graph.degree(a) == 0)
        .count();
    let malformed = graph.atoms().iter().filter(|a| a.malformed).count();
    let max_degree = (0..graph.atom_count())
        .map(|a| graph.degree(a))
        .max()
        .unwrap_or(0);
    let center = graph.geometric_center();

    let mut summary_table = Table::new();
    print_boxed_label(&mut stderr, "Graph Summary")?;
    summary_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    summary_table.set_titles(row!["Metric", "Value"]);
    summary_table.add_row(row!["Atoms", graph.atom_count()]);
    summary_table.add_row(row![
        "Bonds",
        format!(
            "{} ({})",
            graph.bond_count(),
            if explicit_bonds { "explicit" } else { "inferred" }
        )
    ]);
    summary_table.add_row(row!["Isolated Atoms", isolated]);
    summary_table.add_row(row!["Malformed Atoms", malformed]);
    summary_table.add_row(row!["Max Degree", max_degree]);
    summary_table.add_row(row![
        "Geometric Centre (Å)",
        format!("({:.3}, {:.3}, {:.3})", center.x, center.y, center.z)
    ]);
    summary_table
        .print(&mut stderr)
        .context("Failed to render graph summary")?;

    Ok(())
}
