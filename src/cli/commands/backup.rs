use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::log::ttlog_or_warn;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, force } = cmd {
        let files = BackupLogic::backup(cfg, file, *force)?;
        success(format!("Backup created: {} ({} files)", file, files));

        ttlog_or_warn(&cfg.database, "backup", file, &format!("{} files", files));
    }

    Ok(())
}
