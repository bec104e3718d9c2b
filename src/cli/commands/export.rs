use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::db::log::ttlog_or_warn;
use crate::errors::AppResult;
use crate::models::identifier::Identifier;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        id,
        force,
    } = cmd
    {
        let only: Option<Identifier> = id.as_deref().map(str::parse).transpose()?;

        let rows = ExportLogic::export(cfg, *format, file, only.as_ref(), *force)?;
        success(format!(
            "{} export completed: {} ({} records)",
            format.as_str().to_uppercase(),
            file,
            rows
        ));

        ttlog_or_warn(&cfg.database, "export", file, &format!("{} records", rows));
    }

    Ok(())
}
