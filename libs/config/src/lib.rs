//! # Netpuncher Tool Configuration
//!
//! Configuration for tools built on the puncher codec: logging, receive
//! buffer sizing, and where to listen.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use puncher_config::load_config;
//!
//! let config = load_config(Some(std::path::Path::new("puncher.toml")))?;
//! let timeout = config.listen.read_timeout();
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod defaults;
pub mod tool_config;

// Re-export commonly used types
pub use tool_config::{
    load_config, CodecSettings, ListenConfig, LoggingConfig, PuncherConfig,
};
