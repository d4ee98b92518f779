//! Default values shared by netpuncher tools

/// Log filter used when neither the config file nor `RUST_LOG` sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default UDP listen address (the puncher's well-known port)
pub const DEFAULT_BIND_ADDRESS: &str = "[::]:11113";

/// Receive buffer size; anything at or above `codec::MAX_PACKET_SIZE` works
pub const DEFAULT_RECV_BUFFER_SIZE: usize = 2048;

/// Prefix for environment overrides, e.g. `PUNCHER__LISTEN__BIND_ADDRESS`
pub const ENV_PREFIX: &str = "PUNCHER";

/// Separator between nested keys in environment overrides
pub const ENV_SEPARATOR: &str = "__";
