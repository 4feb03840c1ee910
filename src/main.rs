use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use rayon::prelude::*;

use propcnf::clauses::{flatten_to_string, ClauseReport};
use propcnf::dimacs::DimacsFormula;
use propcnf::parser::{print_infix, ParsedFormula};
use propcnf::parser_io::FormulaTree;
use propcnf::{Assignment, Formula, TruthTable, MAX_TRUTH_TABLE_ATOMS};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the prefix form, canonical infix form and height of a formula
    Print {
        #[clap(value_parser, value_name = "FORMULA")]
        /// Fully parenthesized formula, e.g. "((~p)+(q*r))"
        formula: String,
    },

    /// Evaluate a formula under a single assignment
    Eval {
        #[clap(value_parser, value_name = "FORMULA")]
        /// Fully parenthesized formula
        formula: String,

        #[clap(short, long = "assign", value_parser = parse_binding, value_name = "ATOM=0|1")]
        /// Truth value of an atom, may be repeated
        assignments: Vec<(String, bool)>,
    },

    /// Print the full truth table of a formula
    Table {
        #[clap(value_parser, value_name = "FORMULA")]
        /// Fully parenthesized formula
        formula: String,

        #[clap(long)]
        /// Write the table in csv format
        csv: bool,

        #[clap(long, value_name = "N", default_value_t = MAX_TRUTH_TABLE_ATOMS)]
        /// Refuse to enumerate formulas with more than N atoms
        max_atoms: usize,

        #[clap(value_parser, short, long, value_name = "FILE")]
        /// The output filename (or stdout if not provided)
        output: Option<PathBuf>,
    },

    /// Convert a formula to CNF and classify its clauses
    Cnf {
        #[clap(value_parser, value_name = "FORMULA")]
        /// Fully parenthesized formula
        formula: String,

        #[clap(long, value_parser, value_name = "FILE")]
        /// Render the CNF tree to a GraphViz file
        dot: Option<PathBuf>,
    },

    /// Check DIMACS files for tautological clauses
    Dimacs {
        #[clap(value_parser, required = true, value_name = "FILE")]
        /// DIMACS CNF input files, checked in parallel
        files: Vec<PathBuf>,
    },
}

fn parse_binding(s: &str) -> Result<(String, bool), String> {
    let (atom, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ATOM=VALUE, got '{s}'"))?;

    let value = match value.trim() {
        "1" | "true" | "t" | "T" => true,
        "0" | "false" | "f" | "F" => false,
        other => return Err(format!("invalid truth value '{other}'")),
    };

    Ok((atom.trim().to_string(), value))
}

fn parse_formula(formula: &str) -> anyhow::Result<ParsedFormula> {
    ParsedFormula::new(formula).with_context(|| format!("cannot parse '{formula}'"))
}

fn require_root(parsed: &ParsedFormula) -> anyhow::Result<&Formula> {
    parsed
        .root
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("the formula is empty"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = argfile::expand_args_from(wild::args_os(), argfile::parse_fromfile, argfile::PREFIX)?;
    let args = Args::parse_from(args);

    match args.command {
        Command::Print { formula } => {
            let parsed = parse_formula(&formula)?;
            let mut writer = BufWriter::new(io::stdout());

            writeln!(writer, "prefix: {}", parsed.prefix)?;
            writeln!(writer, "infix:  {}", parsed.infix())?;
            writeln!(writer, "height: {}", parsed.height())?;
            writer.flush()?;
        }
        Command::Eval {
            formula,
            assignments,
        } => {
            let parsed = parse_formula(&formula)?;
            let root = require_root(&parsed)?;
            let assignment: Assignment = assignments.into_iter().collect();

            let value = root.evaluate(&assignment)?;
            println!("{}", u8::from(value));
        }
        Command::Table {
            formula,
            csv,
            max_atoms,
            output,
        } => {
            let parsed = parse_formula(&formula)?;
            let root = require_root(&parsed)?;
            let table = TruthTable::with_max_atoms(root, max_atoms)?;

            log::info!("enumerating {} rows", table.len());

            let writer = if let Some(output_file) = output {
                let file = File::create(&output_file)
                    .with_context(|| format!("cannot create {}", output_file.display()))?;
                Box::new(BufWriter::new(file)) as Box<dyn Write>
            } else {
                Box::new(BufWriter::new(io::stdout())) as Box<dyn Write>
            };

            if csv {
                write_csv(&table, writer)?;
            } else {
                write_table(&table, writer)?;
            }
        }
        Command::Cnf { formula, dot } => {
            let parsed = parse_formula(&formula)?;
            let cnf = parsed.cnf();
            let mut writer = BufWriter::new(io::stdout());

            writeln!(writer, "{}", parsed.infix())?;
            writeln!(writer, "{}", print_infix(cnf.as_ref()))?;
            writeln!(writer, "{}", flatten_to_string(cnf.as_ref()))?;
            writeln!(writer, "{}", ClauseReport::new(cnf.as_ref()))?;
            writer.flush()?;

            if let (Some(dot_file), Some(cnf)) = (dot, cnf.as_ref()) {
                let mut file = File::create(&dot_file)
                    .with_context(|| format!("cannot create {}", dot_file.display()))?;
                FormulaTree::new(cnf).render_dot(&mut file)?;
            }
        }
        Command::Dimacs { files } => {
            let results: Vec<anyhow::Result<DimacsFormula>> = files
                .par_iter()
                .map(|path| {
                    let file = File::open(path)
                        .with_context(|| format!("cannot open {}", path.display()))?;
                    DimacsFormula::parse(BufReader::new(file))
                        .with_context(|| format!("cannot read {}", path.display()))
                })
                .collect();

            let mut failures = 0;

            for (path, result) in files.iter().zip(results) {
                match result {
                    Ok(formula) => {
                        let tautological = formula.tautological_clause_count();
                        println!(
                            "{}: {}, valid clauses: {}, invalid clauses: {}",
                            path.display(),
                            if formula.is_valid() { "Valid" } else { "Invalid" },
                            tautological,
                            formula.non_tautological_clause_count(),
                        );
                    }
                    Err(e) => {
                        log::error!("{:#}", e);
                        failures += 1;
                    }
                }
            }

            if failures > 0 {
                anyhow::bail!("{failures} of {} files could not be checked", files.len());
            }
        }
    }

    Ok(())
}

fn write_table(table: &TruthTable, mut writer: Box<dyn Write>) -> anyhow::Result<()> {
    writeln!(writer, "{}", table.header())?;

    for row in table.rows() {
        writeln!(writer, "{}", row?)?;
    }

    // flush the writer before dropping it
    writer.flush()?;

    Ok(())
}

fn write_csv(table: &TruthTable, writer: Box<dyn Write>) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(table.atoms().iter().map(|a| a.name()).chain(["value"]))?;

    for row in table.rows() {
        let row = row?;
        let record = row
            .assignment
            .iter()
            .map(|(_, v)| u8::from(v))
            .chain([u8::from(row.value)])
            .map(|v| v.to_string())
            .collect_vec();
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;

    Ok(())
}
