use std::io::IsTerminal;

use clap::Parser;
use cli::{Args, ColorArg, Command};
use command::{
    alias::alias, argument::argument, fmt::fmt, logic::logic, new::example, new::new,
    preview::preview, validate::validate,
};
use shell::Shell;
use termcolor::ColorChoice;
use tracing::Level;

pub mod cli;
pub mod command;
pub mod shell;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run_cli() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let color = match args.color {
        ColorArg::Always => ColorChoice::Always,
        ColorArg::Never => ColorChoice::Never,
        ColorArg::Auto if std::io::stderr().is_terminal() => ColorChoice::Auto,
        ColorArg::Auto => ColorChoice::Never,
    };
    let mut shell = Shell::new(color);

    match args.command {
        Command::New(args) => new(&mut shell, args)?,
        Command::Example(args) => example(&mut shell, args)?,
        Command::Validate(args) => validate(&mut shell, args)?,
        Command::Fmt(args) => fmt(&mut shell, args)?,
        Command::Preview(args) => preview(&mut shell, args)?,
        Command::Arg(args) => argument(&mut shell, args)?,
        Command::Logic(args) => logic(&mut shell, args)?,
        Command::Alias(args) => alias(&mut shell, args)?,
    }

    Ok(())
}
