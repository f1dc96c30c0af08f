mod cli;
mod prelude;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();
    debug!(version = crate_version!(), "starting…");

    match args.command {
        Command::Merge(args) => args.run(|sequence| sequence.merge()),
        Command::Gaps(args) => args.run(|sequence| sequence.gaps().clone()),
        Command::Inspect(args) => args.inspect(),
        Command::Union(args) => args.run(|left, right| left.union(right)),
        Command::Intersect(args) => args.run(|left, right| left.intersect(right)),
        Command::Subtract(args) => args.run(|left, right| left.subtract(right)),
    }
}
