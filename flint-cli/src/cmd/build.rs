use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use flint_core::Site;

use crate::config::load_build_config;

pub fn add_build_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("content")
                .short('c')
                .long("content")
                .value_name("DIR")
                .help("Content directory containing markdown files"),
        )
        .arg(
            Arg::new("static")
                .short('s')
                .long("static")
                .value_name("DIR")
                .help("Static asset directory, copied verbatim"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory for the generated site"),
        )
        .arg(
            Arg::new("template")
                .short('t')
                .long("template")
                .value_name("FILE")
                .help("Page template with {{ Title }} and {{ Content }} tokens"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .default_value("./flint.toml"),
        )
}

pub fn make_subcommand() -> Command {
    add_build_args(Command::new("build")).about("Build the site from markdown content")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let config = load_build_config(args)?;
    let output = config.output.clone();

    Site::new(config).build()?;

    println!("Site built successfully in {}", output.display());

    Ok(())
}
