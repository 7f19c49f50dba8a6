//! `sgv`: validate PodGroup subgroup hierarchies from the command line.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
