use anyhow::Result;
use clap::{ArgMatches, Command};

use crate::config::load_build_config;

pub fn make_subcommand() -> Command {
    super::build::add_build_args(Command::new("clean"))
        .about("Remove the generated output directory")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let config = load_build_config(args)?;

    if config.output.exists() {
        std::fs::remove_dir_all(&config.output)?;
        println!("Removed {}", config.output.display());
    } else {
        println!("Nothing to clean in {}", config.output.display());
    }

    Ok(())
}
