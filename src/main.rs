mod aggregate;
mod config;
mod db;
mod error;
mod ledger;
mod logging;
mod models;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    logging::init(&config.log_path)?;
    tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");
    let mut db = db::Database::open(&config.db_path)?;

    let result = match args.len() {
        1 => run::as_tui(&mut db),
        2.. => run::as_cli(&args, &mut db),
        _ => {
            eprintln!("Usage: pocketbudget [command]");
            Ok(())
        }
    };
    if let Err(ref e) = result {
        tracing::error!(error = %e, "command failed");
    }
    result
}
