mod commands;
mod graph;
mod map;
mod parser;
mod state;
mod store;
mod theme;
mod tui;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kvlt",
    about = "A terminal browser for the militant black metal genealogy map"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scaffold kvlt/map.kvlt in the current directory
    Init,
    /// Open the interactive map browser
    View {
        /// Launch with a built-in sample map (no map file required)
        #[arg(long)]
        demo: bool,
    },
    /// Print all bands in map order
    List,
    /// Print the member index with band counts
    Members,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Init => commands::init::run(),
        Command::View { demo } => commands::view::run(demo),
        Command::List => commands::list::run(),
        Command::Members => commands::members::run(),
    }
}
