//! Read two square matrices from stdin and print their sum, difference and
//! product.
//!
//! Input format: the dimension `n`, then `n * n` values for each matrix,
//! whitespace separated and row-major.
//!
//! ```text
//! cargo run --example matrix_calc -- --limits limits.json < input.txt
//! ```
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, Command, ValueHint};
use log::LevelFilter;

use dynamic_matrix::{DynamicMatrix, Limits, TokenReader};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MATRIX_LOG", "error,dynamic_matrix=info"))
        .init();

    let matches = Command::new("matrix_calc")
        .version(clap::crate_version!())
        .about("Sum, difference and product of two square matrices read from stdin")
        .arg(
            Arg::new("limits")
                .short('l')
                .long("limits")
                .help("JSON file overriding max_vector_size / max_matrix_size")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .get_matches();

    let limits = match matches.get_one::<PathBuf>("limits") {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open limits file: {}", path.display()))?;
            Limits::from_reader(file)
                .with_context(|| format!("Failed to load limits from {}", path.display()))?
        }
        None => Limits::default(),
    };

    let stdin = io::stdin();
    let mut tokens = TokenReader::new(stdin.lock());
    let size: usize = tokens
        .parse_n::<usize>(1)
        .context("Failed to read matrix dimension")?
        .remove(0);
    log::info!("Reading two {}x{} matrices", size, size);

    let mut lhs = DynamicMatrix::<i64>::with_limits(size, &limits)?;
    let mut rhs = DynamicMatrix::<i64>::with_limits(size, &limits)?;
    lhs.read_from(&mut tokens).context("Failed to read first matrix")?;
    rhs.read_from(&mut tokens).context("Failed to read second matrix")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "sum:")?;
    (&lhs + &rhs)?.write_to(&mut out)?;
    writeln!(out, "difference:")?;
    (&lhs - &rhs)?.write_to(&mut out)?;
    writeln!(out, "product:")?;
    (&lhs * &rhs)?.write_to(&mut out)?;

    Ok(())
}
