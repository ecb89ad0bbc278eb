//! Console Adapter - Banner, Screen Clearing and Tracing Setup
//!
//! Everything the operator sees in the terminal goes through `tracing`;
//! this module owns the subscriber setup and the two cosmetic pieces of
//! the loop (startup banner and per-iteration screen clear).

use std::io::Write;

use tracing_subscriber::EnvFilter;

use crate::config::{BotConfig, LogFormat};

/// Startup banner.
pub const BANNER: &str = r"
  ______               ______ _
 |__  __|             |  ____(_)
    | | ___  __ _     | |__   _
    | |/ _ \/ _` |    |  __| | |
    | |  __/ (_| |    | |    | |
    |_|\___|\__,_|    |_|    |_|

    POL -> WPOL convert bot  |  swap, report, points, daily check-in
";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides `bot.log_level`. JSON output is meant for log
/// shippers; pretty output for an operator watching the terminal.
pub fn init_tracing(config: &BotConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let result = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}

/// Clear the terminal and move the cursor home (ANSI).
pub fn clear_screen() {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "\x1B[2J\x1B[1;1H");
    let _ = stdout.flush();
}
