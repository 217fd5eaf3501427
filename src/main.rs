use anyhow::{Context, Result};
use clap::Parser;

/// Reads public/launchpad-rocket-logo.png and writes traka-launchpad.ico,
/// both relative to the working directory.
#[derive(Debug, Parser)]
#[clap(
    name = "launchpad-icon",
    version,
    about = "Generate the Traka Launchpad desktop icon (multi-resolution ICO)"
)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    let root = std::env::current_dir().context("Can't determine the working directory")?;
    launchpad_icon::generate_icon(&root)?;
    Ok(())
}
