use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};
use serde::Serialize;

use chain_forge::io::InputFrame;
use chain_forge::ops::{BOND_BUFFER, BondInference, ClassifyConfig, classify};
use chain_forge::{Assembly, AssemblySummary, BondGraph};

use crate::commands::{print_boxed_label, run_with_spinner};

/// Classifies every atom of the frame and reports the resulting hierarchy.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Keep the input coordinates instead of moving the geometric centre to the origin.
    #[arg(long)]
    no_center: bool,
    /// Slack added to the van der Waals bonding cutoff, in ångströms.
    #[arg(long, value_name = "ANGSTROM", default_value_t = BOND_BUFFER)]
    buffer: f64,
    /// Never bond two hydrogens to each other during inference.
    #[arg(long)]
    skip_hydrogen_pairs: bool,
    /// Print a JSON report to stdout instead of tables.
    #[arg(long)]
    json: bool,
}

pub fn run(frame: &InputFrame, args: &ClassifyArgs) -> Result<()> {
    let inference = BondInference::new()
        .buffer(args.buffer)
        .skip_hydrogen_pairs(args.skip_hydrogen_pairs);
    let config = ClassifyConfig {
        inference: inference.clone(),
        center: !args.no_center,
        ..Default::default()
    };

    let assembly = run_with_spinner("Classifying atoms", || {
        let graph =
            BondGraph::from_frame(frame, &inference).context("Failed to build the bond graph")?;
        Ok(classify(graph, &config))
    })?;

    let report = Report::from(&assembly);
    if args.json {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        serde_json::to_writer_pretty(&mut handle, &report)
            .context("Failed to write JSON report")?;
        writeln!(handle)?;
        Ok(())
    } else {
        print_tables(&report)
    }
}

#[derive(Debug, Serialize)]
struct Report {
    summary: AssemblySummary,
    polymers: Vec<PolymerReport>,
    molecules: Vec<MoleculeReport>,
}

#[derive(Debug, Serialize)]
struct PolymerReport {
    id: String,
    kind: String,
    residues: usize,
    atoms: usize,
    joints: usize,
    sequence: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MoleculeReport {
    name: String,
    kind: String,
    composition: String,
    atoms: usize,
}

impl From<&Assembly> for Report {
    fn from(assembly: &Assembly) -> Self {
        let polymers = assembly
            .polymers()
            .iter()
            .map(|p| PolymerReport {
                id: p.id.to_string(),
                kind: p.kind.to_string(),
                residues: p.residue_count(),
                atoms: p.atom_count(),
                joints: p.joint_count(),
                sequence: p.sequence().into_iter().map(str::to_string).collect(),
            })
            .collect();
        let molecules = assembly
            .iter_molecules_with_site()
            .map(|(_, m)| MoleculeReport {
                name: m.name.to_string(),
                kind: m.kind.to_string(),
                composition: m.composition.to_string(),
                atoms: m.atom_count(),
            })
            .collect();
        Self {
            summary: assembly.summary(),
            polymers,
            molecules,
        }
    }
}

fn print_tables(report: &Report) -> Result<()> {
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, "ChainForge Classification Report")?;
    writeln!(&mut stderr)?;

    let mut polymer_table = Table::new();
    print_boxed_label(&mut stderr, "Polymers")?;
    polymer_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    polymer_table.set_titles(row!["Chain", "Kind", "Residues", "Atoms", "Joints", "Sequence"]);
    for polymer in &report.polymers {
        polymer_table.add_row(row![
            polymer.id,
            polymer.kind,
            polymer.residues,
            polymer.atoms,
            polymer.joints,
            abbreviate(&polymer.sequence, 8)
        ]);
    }
    polymer_table
        .print(&mut stderr)
        .context("Failed to render polymer summary")?;
    writeln!(&mut stderr)?;

    let mut molecule_table = Table::new();
    print_boxed_label(&mut stderr, "Molecules")?;
    molecule_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    molecule_table.set_titles(row!["Name", "Kind", "Composition", "Count"]);
    for (molecule, count) in group_molecules(&report.molecules) {
        molecule_table.add_row(row![
            molecule.name,
            molecule.kind,
            molecule.composition,
            count
        ]);
    }
    molecule_table
        .print(&mut stderr)
        .context("Failed to render molecule summary")?;
    writeln!(&mut stderr)?;

    let summary = &report.summary;
    let mut summary_table = Table::new();
    print_boxed_label(&mut stderr, "Assembly Summary")?;
    summary_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    summary_table.set_titles(row!["Metric", "Value"]);
    summary_table.add_row(row!["Atoms", summary.atoms]);
    summary_table.add_row(row!["Bonds", summary.bonds]);
    summary_table.add_row(row!["Polymers", summary.polymers]);
    summary_table.add_row(row!["Residues", summary.residues]);
    summary_table.add_row(row!["Molecules", summary.molecules]);
    summary_table.add_row(row!["Ions", summary.ions]);
    summary_table.add_row(row!["Water", summary.water]);
    summary_table.add_row(row!["Angles", summary.angles]);
    summary_table.add_row(row!["Dihedrals", summary.dihedrals]);
    summary_table.add_row(row!["Joints", summary.joints]);
    summary_table
        .print(&mut stderr)
        .context("Failed to render assembly summary")?;

    Ok(())
}

/// Identical molecules collapsed into one row each, in first-seen order.
fn group_molecules(molecules: &[MoleculeReport]) -> Vec<(&MoleculeReport, usize)> {
    let mut groups: Vec<(&MoleculeReport, usize)> = Vec::new();
    for molecule in molecules {
        match groups.iter_mut().find(|(m, _)| {
            m.name == molecule.name && m.kind == molecule.kind && m.composition == molecule.composition
        }) {
            Some((_, count)) => *count += 1,
            None => groups.push((molecule, 1)),
        }
    }
    groups
}

fn abbreviate(sequence: &[String], limit: usize) -> String {
    if sequence.len() <= limit {
        return sequence.join("-");
    }
    format!(
        "{}-...-{} ({})",
        sequence[..limit / 2].join("-"),
        sequence[sequence.len() - limit / 2..].join("-"),
        sequence.len()
    )
}
