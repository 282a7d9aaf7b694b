use clap::Parser;
use env_logger::Builder;
use sgsimplify::cli::{run, Args};
use std::io::{self, BufWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    Builder::from_default_env()
        .filter_level(args.log_level())
        .init();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(&args, &mut out)?;
    Ok(())
}
