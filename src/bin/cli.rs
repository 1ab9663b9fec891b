// src/bin/cli.rs
use bbti_collect::cli;
use color_eyre::eyre::{ eyre, Result };

fn main() -> Result<()> {
    color_eyre::install()?;
    cli::run().map_err(|e| eyre!("{e}"))
}
