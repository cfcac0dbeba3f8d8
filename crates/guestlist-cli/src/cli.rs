use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "guestlist",
    about = "Guest list service: REST API and offline tools over a CSV guest file",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Debug logging. Any value of DEBUG other than a falsey one enables it.
    #[arg(
        short,
        long,
        global = true,
        env = "DEBUG",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new(),
    )]
    pub verbose: bool,

    /// Guest file, overriding the config file.
    #[arg(short, long, global = true, env = "FILENAME")]
    pub file: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(short, long, global = true, env = "GUESTLIST_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// List every guest
    List,
    /// Show a single guest
    Show(ShowArgs),
    /// Add a guest
    Add(AddArgs),
    /// Remove every guest with an id
    Remove(RemoveArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Listen address, overriding the config file.
    #[arg(long, env = "BIND_ADDR")]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    pub name: String,
    #[arg(default_value = "")]
    pub last_name: String,
    #[arg(long)]
    pub plus_one: bool,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub id: String,
}
