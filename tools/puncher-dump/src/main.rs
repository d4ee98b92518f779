use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codec::ProtocolVersion;
use config::{LoggingConfig, PuncherConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod net;

use commands::MessageSpec;

#[derive(Parser)]
#[command(name = "puncher-dump")]
#[command(about = "Encode, decode and sniff netpuncher control messages")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a message and print it as hex
    Encode {
        /// Header version byte to write
        #[arg(long, default_value_t = ProtocolVersion::NEWEST.0)]
        protocol_version: u8,
        #[command(subcommand)]
        message: MessageSpec,
    },
    /// Decode one hex-encoded message
    Decode {
        /// Hex bytes, e.g. "5401" or "0x51 01 39 05 00 00"
        hex: String,
    },
    /// Decode every message in a capture file
    Dump {
        path: PathBuf,
    },
    /// List registered message types
    Types,
    /// Print the effective configuration
    Config,
    /// Log every message received on a UDP socket
    Listen {
        /// Overrides listen.bind_address
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Send one message over UDP
    Send {
        target: SocketAddr,
        /// Wait for and print one reply
        #[arg(long)]
        wait: bool,
        #[command(subcommand)]
        message: MessageSpec,
    },
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level)
            .with_context(|| format!("Invalid log filter '{}'", logging.level))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PuncherConfig::load(cli.config.as_deref())?;
    init_logging(&config.logging)?;
    debug!(path = ?cli.config, ?config, "configuration loaded");

    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Encode {
            protocol_version,
            message,
        } => {
            let hex = commands::encode_hex(&message, ProtocolVersion(protocol_version))?;
            writeln!(stdout, "{hex}")?;
        }

        Commands::Decode { hex } => {
            let message = commands::decode_hex(&hex)?;
            writeln!(stdout, "{message}")?;
        }

        Commands::Dump { path } => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            let count = commands::dump(file, &mut stdout).await?;
            writeln!(stdout, "{count} message(s)")?;
        }

        Commands::Types => commands::write_types(&mut stdout)?,

        Commands::Config => write!(stdout, "{}", config.to_toml_string()?)?,

        Commands::Listen { bind } => {
            let received = net::listen(&config, bind).await?;
            writeln!(stdout, "{received} datagram(s) received")?;
        }

        Commands::Send {
            target,
            wait,
            message,
        } => {
            let message = message.to_message(ProtocolVersion::NEWEST);
            if let Some(reply) = net::send(&config, target, &message, wait).await? {
                writeln!(stdout, "{reply}")?;
            }
        }
    }

    Ok(())
}
