use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use flexible_commands::{ArgumentType, LogicType};

#[derive(Parser, Debug)]
#[command(author, version, about = "Edit and check flexible command configuration files", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
    /// Increase log output. Use -vv for trace output.
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// When to colorize status output.
    #[clap(long, value_enum, default_value = "auto", env = "FLEXCMD_COLOR", global = true)]
    pub color: ColorArg,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write an empty command (or info) document
    New(NewArgs),
    /// Write the bundled example document
    Example(NewArgs),
    /// Check that every placeholder resolves and report unused declarations
    Validate(ValidateArgs),
    /// Rewrite a document in canonical form
    Fmt(FmtArgs),
    /// Render a command document with sample inputs
    Preview(PreviewArgs),
    /// Edit the arguments of a command document
    #[command(alias = "argument")]
    Arg(ArgArgs),
    /// Edit the custom logic of a command document
    Logic(LogicArgs),
    /// Edit the aliases of an info document
    Alias(AliasArgs),
}

#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Produce an info document instead of a command document.
    #[clap(long)]
    pub info: bool,

    #[clap(short, long)]
    /// Optional path to write to. Defaults to stdout.
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    pub path: PathBuf,

    #[clap(long)]
    /// Treat warnings such as unused declarations as failures.
    pub deny_warnings: bool,
}

#[derive(Parser, Debug)]
pub struct FmtArgs {
    pub path: PathBuf,

    #[clap(long)]
    /// Only report whether the file is already canonical.
    pub check: bool,

    #[clap(long)]
    /// Write single-line JSON.
    pub compact: bool,
}

#[derive(Parser, Debug)]
pub struct PreviewArgs {
    pub path: PathBuf,

    /// Values for the declared arguments, in order.
    pub arguments: Vec<String>,

    #[clap(short, long = "player")]
    /// Online player available to `randomplayer` logic. Repeatable.
    pub players: Vec<String>,

    #[clap(long, env = "FLEXCMD_SEED")]
    /// Seed for custom logic evaluation.
    pub seed: Option<u64>,

    #[clap(short = 'n', long, default_value_t = 1)]
    /// Number of renders to produce.
    pub count: usize,
}

#[derive(Parser, Debug)]
pub struct ArgArgs {
    /// Command document to edit in place.
    pub path: PathBuf,

    #[command(subcommand)]
    pub action: ArgAction,
}

#[derive(Subcommand, Debug)]
pub enum ArgAction {
    /// Declare a new argument
    Add {
        name: String,
        #[clap(value_parser = parse_argument_type)]
        r#type: ArgumentType,
    },
    /// Change an argument's type
    SetType {
        name: String,
        #[clap(value_parser = parse_argument_type)]
        r#type: ArgumentType,
    },
    /// Replace the choices of a choice argument (comma separated)
    Choices { name: String, choices: String },
    /// Rename an argument
    Rename { name: String, new_name: String },
    /// Remove an argument
    Remove { name: String },
}

#[derive(Parser, Debug)]
pub struct LogicArgs {
    /// Command document to edit in place.
    pub path: PathBuf,

    #[command(subcommand)]
    pub action: LogicAction,
}

#[derive(Subcommand, Debug)]
pub enum LogicAction {
    /// Declare a new custom logic entry
    Add {
        key: String,
        #[clap(value_parser = parse_logic_type)]
        r#type: LogicType,
        /// Parameters as a JSON object, e.g. '{"min": 1, "max": 64}'.
        #[clap(long, default_value = "{}")]
        params: String,
    },
    /// Replace the parameters of an entry
    Update {
        key: String,
        /// Parameters as a JSON object.
        params: String,
    },
    /// Switch an entry's type, resetting its parameters
    SetType {
        key: String,
        #[clap(value_parser = parse_logic_type)]
        r#type: LogicType,
    },
    /// Remove an entry
    Remove { key: String },
}

#[derive(Parser, Debug)]
pub struct AliasArgs {
    /// Info document to edit in place.
    pub path: PathBuf,

    #[command(subcommand)]
    pub action: AliasAction,
}

#[derive(Subcommand, Debug)]
pub enum AliasAction {
    /// Append an alias
    Add { alias: String },
    /// Replace the alias at an index
    Set { index: usize, alias: String },
    /// Remove the alias at an index
    Remove { index: usize },
}

fn parse_argument_type(s: &str) -> Result<ArgumentType, String> {
    s.parse().map_err(|e: flexible_commands::argument::UnknownArgumentType| e.to_string())
}

fn parse_logic_type(s: &str) -> Result<LogicType, String> {
    s.parse().map_err(|e: flexible_commands::logic::UnknownLogicType| e.to_string())
}
