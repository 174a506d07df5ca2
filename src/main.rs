use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use pcec::commands::completions::Shell;
use pcec::commands::{completions, console, fetch, logs, request, server, show};
use pcec::render::printer::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH};
use pcec::validation::clap_node_id_validator;
use pcec::LOGO;

#[derive(Parser)]
#[command(name = "pcec")]
#[command(about = "Topology console for a Path Computation Element", long_about = None)]
#[command(before_help = LOGO)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a topology file to stdout
    Show {
        /// Path to the topology file
        file: PathBuf,

        /// Map width in cells
        #[arg(long, default_value_t = DEFAULT_MAP_WIDTH)]
        width: usize,

        /// Map height in cells
        #[arg(long, default_value_t = DEFAULT_MAP_HEIGHT)]
        height: usize,
    },

    /// Fetch the controller's topology and render it
    Fetch {
        /// Controller base URL (overrides pcec.toml)
        #[arg(long)]
        url: Option<String>,
    },

    /// Request a path between two nodes and render it highlighted
    Request {
        /// Source node identifier
        #[arg(value_parser = clap_node_id_validator)]
        source: String,

        /// Target node identifier
        #[arg(value_parser = clap_node_id_validator)]
        target: String,

        /// Controller base URL (overrides pcec.toml)
        #[arg(long)]
        url: Option<String>,
    },

    /// Control the PCE server
    Server {
        #[command(subcommand)]
        command: ServerCommands,
    },

    /// Print server log records
    Logs {
        /// Keep polling for new records every two seconds
        #[arg(short, long)]
        follow: bool,

        /// Controller base URL (overrides pcec.toml)
        #[arg(long)]
        url: Option<String>,
    },

    /// Open the interactive console
    Console {
        /// Controller base URL (overrides pcec.toml)
        #[arg(long)]
        url: Option<String>,

        /// Render a local topology file instead of fetching
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Generate shell completions (bash, zsh, fish)
    Completions {
        /// Target shell
        shell: String,
    },
}

#[derive(Subcommand)]
enum ServerCommands {
    /// Report whether the PCE server is running
    Status {
        /// Controller base URL (overrides pcec.toml)
        #[arg(long)]
        url: Option<String>,
    },

    /// Start the PCE server on a named topology
    Start {
        /// Topology name known to the controller (file stem, no extension)
        topology: String,

        /// Controller base URL (overrides pcec.toml)
        #[arg(long)]
        url: Option<String>,
    },

    /// Stop the PCE server
    Stop {
        /// Controller base URL (overrides pcec.toml)
        #[arg(long)]
        url: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            file,
            width,
            height,
        } => show::execute(&file, width, height),
        Commands::Fetch { url } => fetch::execute(url),
        Commands::Request {
            source,
            target,
            url,
        } => request::execute(&source, &target, url),
        Commands::Server { command } => match command {
            ServerCommands::Status { url } => server::status(url),
            ServerCommands::Start { topology, url } => server::start(&topology, url),
            ServerCommands::Stop { url } => server::stop(url),
        },
        Commands::Logs { follow, url } => logs::execute(url, follow),
        Commands::Console { url, file } => console::execute(url, file),
        Commands::Completions { shell } => {
            let shell = Shell::from_str(&shell)?;
            completions::execute(&mut Cli::command(), shell);
            Ok(())
        }
    }
}
