//! netpath CLI - Network topology editing and path queries
//!
//! Edits JSON network files of PCs, switches and routers and prints the
//! least-cost path between two devices.

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// netpath - Least-cost paths through small network topologies
#[derive(Parser)]
#[command(name = "netpath")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Edit network topologies and find least-cost paths between devices")]
#[command(long_about = r#"
netpath edits network files of PCs, switches and routers and finds the
least-cost path between two devices. Link costs depend on the device types
at each end and can be changed in ~/.netpath/config.toml.

Examples:
  netpath new lab.json                       # Create an empty network
  netpath add lab.json pc --x 40 --y 80      # Place PC 0
  netpath connect lab.json "PC 0" "Switch 0" # Link two devices
  netpath path lab.json "PC 0" "Router 1"    # Least-cost path
"#)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.netpath/config.toml)
    #[arg(long, env = "NETPATH_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty network file
    New {
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Add a device (pc, switch or router)
    Add {
        file: PathBuf,

        device_type: String,

        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        x: f64,

        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        y: f64,
    },

    /// Connect two devices, e.g. "PC 0" "Switch 1"
    Connect { file: PathBuf, a: String, b: String },

    /// Remove the connection between two devices
    Disconnect { file: PathBuf, a: String, b: String },

    /// Remove a device and its connections
    Remove { file: PathBuf, device: String },

    /// List devices and connections
    Show { file: PathBuf },

    /// Find the least-cost path between two devices
    Path {
        file: PathBuf,

        from: String,

        to: String,

        /// Also print the distance to every device
        #[arg(long)]
        all: bool,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set a configuration value (key=value)
        #[arg(long)]
        set: Option<String>,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("netpath={0},netpath_cli={0},warn", log_level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Load configuration
    let config_path = config::config_path(cli.config.as_deref());
    let mut config = config::load(&config_path)?;
    tracing::debug!(path = %config_path.display(), "Configuration loaded");

    match cli.command {
        Commands::New { file, force } => commands::new_network(&file, force, &config)?,
        Commands::Add {
            file,
            device_type,
            x,
            y,
        } => commands::add_device(&file, &device_type, x, y, &config)?,
        Commands::Connect { file, a, b } => commands::connect(&file, &a, &b, &config)?,
        Commands::Disconnect { file, a, b } => commands::disconnect(&file, &a, &b, &config)?,
        Commands::Remove { file, device } => commands::remove_device(&file, &device, &config)?,
        Commands::Show { file } => commands::show(&file, &config)?,
        Commands::Path { file, from, to, all } => {
            commands::find_path(&file, &from, &to, all, &config)?
        }
        Commands::Config { show, set } => {
            if show {
                commands::show_config(&config, &config_path)?;
            } else if let Some(kv) = set {
                commands::set_config(&mut config, &config_path, &kv)?;
            } else {
                commands::show_config(&config, &config_path)?;
            }
        }
    }

    Ok(())
}
