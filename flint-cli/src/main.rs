use clap::Command;

mod cmd;
mod config;

fn main() -> anyhow::Result<()> {
    let matches = Command::new("flint")
        .about("Turn a folder of Markdown into a static website")
        .arg_required_else_help(true)
        .subcommand(cmd::build::make_subcommand())
        .subcommand(cmd::clean::make_subcommand())
        .get_matches();

    match matches.subcommand() {
        Some(("build", args)) => cmd::build::execute(args),
        Some(("clean", args)) => cmd::clean::execute(args),
        _ => unreachable!("a subcommand is required"),
    }
}
