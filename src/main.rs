use arcdial::config;
use arcdial::gui::app::AppModel;
use arcdial::sys::command::Command;
use arcdial::sys::runtime;
use arcdial::sys::server::SOCKET_PATH;
use clap::{Parser, Subcommand};
use relm4::prelude::*;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arcdial", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read settings from this file instead of the per-user config
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Send a command to the running dial, e.g. `send progress 40`
    Send {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Send { words }) => {
            let line = words.join(" ");
            line.parse::<Command>()?;
            send_command(&line)
        }
        None => run(cli.config),
    }
}

fn run(explicit_config: Option<PathBuf>) -> anyhow::Result<()> {
    let config_path = config::resolve_config_path(explicit_config)?;
    if let Err(e) = config::write_default_config(&config_path) {
        log::warn!("Could not write default config: {}", e);
    }
    let config = config::load_or_default(&config_path);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, config_path.clone());

    // GTK would otherwise try to parse our flags
    let app = RelmApp::new("org.unary.arcdial").with_args(Vec::new());

    app.run::<AppModel>((config, config_path, rx));
    Ok(())
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to arcdial at {}: {}. Is arcdial running?",
            SOCKET_PATH,
            e
        )
    })?;
    writeln!(stream, "{}", cmd)?;
    Ok(())
}
