use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

use super::open_tracker;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and configuration file (skipped in test mode)
///  - an empty state file, unless one already exists
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let store_path = Config::init_all(cli.store.clone(), cli.test)?;

    println!("⚙️  Initializing rTimeclock…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  State file  : {}", store_path.display());

    let cfg = Config {
        store: store_path.to_string_lossy().to_string(),
        ..cfg.clone()
    };

    // opening also validates an existing file
    let tracker = open_tracker(&cfg)?;
    if tracker.store().exists() {
        info(format!("Existing state file kept at {}", store_path.display()));
    } else {
        tracker.save()?;
        tracing::info!(path = %store_path.display(), "state file initialized");
        success(format!("State file initialized at {}", store_path.display()));
    }

    println!("🎉 rTimeclock initialization completed!");
    Ok(())
}
