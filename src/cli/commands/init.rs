use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::log;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (skipped in test mode)
///  - the data directories (event log, attendance tables)
///  - the internal log database and its migrations
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    println!("⚙️  Initializing rsal…");

    cfg.init_all(cli.test)?;

    let pool = open_db(&cfg.database)?;
    println!("🗄️  Internal log: {}", &cfg.database);

    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        &cfg.data_dir,
        &format!("Data directory initialized at {}", cfg.data_dir),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 rsal initialization completed!");
    Ok(())
}
