use clap::Parser;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const CONNECTIVES: [char; 3] = ['*', '+', '>'];

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(value_parser, value_name = "ATOMS")]
    /// The number of distinct atoms to draw from (at most 52)
    atoms: usize,

    #[clap(value_parser, value_name = "DEPTH")]
    /// The maximum nesting depth of each formula
    depth: usize,

    #[clap(value_parser, short = 'n', long, default_value_t = 1, value_name = "COUNT")]
    /// The number of formulae to generate
    count: usize,

    #[clap(value_parser, short, long, value_name = "FILE")]
    /// The output filename (or stdout if not provided)
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    if args.atoms == 0 || args.atoms > ALPHABET.len() {
        Err(anyhow::anyhow!(
            "Number of atoms must be between 1 and {}",
            ALPHABET.len()
        ))?
    }

    let atoms: Vec<char> = ALPHABET[..args.atoms].iter().map(|&b| b as char).collect();
    let mut rng = rand::thread_rng();

    let mut writer = if let Some(output_file) = args.output {
        let file = File::create(output_file)?;
        Box::new(BufWriter::new(file)) as Box<dyn Write>
    } else {
        Box::new(BufWriter::new(io::stdout())) as Box<dyn Write>
    };

    for _ in 0..args.count {
        let mut formula = String::new();
        generate_formula(&mut rng, &atoms, args.depth, &mut formula)?;
        writeln!(writer, "{}", formula)?;
    }

    // flush the writer before dropping it
    writer.flush()?;

    log::info!("generated {} formulae over {} atoms", args.count, atoms.len());

    Ok(())
}

fn generate_formula<R: Rng>(
    rng: &mut R,
    atoms: &[char],
    depth: usize,
    out: &mut String,
) -> anyhow::Result<()> {
    // stop early now and then so the formulae vary in shape
    if depth == 0 || rng.gen_bool(0.2) {
        let atom = atoms
            .choose(rng)
            .ok_or_else(|| anyhow::anyhow!("No atoms to choose from"))?;
        out.push(*atom);
        return Ok(());
    }

    out.push('(');

    if rng.gen_bool(0.25) {
        out.push('~');
        generate_formula(rng, atoms, depth - 1, out)?;
    } else {
        generate_formula(rng, atoms, depth - 1, out)?;
        let connective = CONNECTIVES
            .choose(rng)
            .ok_or_else(|| anyhow::anyhow!("No connectives to choose from"))?;
        out.push(*connective);
        generate_formula(rng, atoms, depth - 1, out)?;
    }

    out.push(')');

    Ok(())
}
