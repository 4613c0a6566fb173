mod cli;
mod config;
mod process;

#[macro_use]
extern crate log;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let cfg = cli::handle_cli().with_context(|| "Error processing command line arguments")?;
    process::process_depth_anno(&cfg)
}
