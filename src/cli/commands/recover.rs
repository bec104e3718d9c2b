use crate::config::Config;
use crate::core::recovery::recover;
use crate::db::log::ttlog_or_warn;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cfg: &Config) -> AppResult<()> {
    info(format!("Replaying event log in {}", cfg.logs_dir().display()));

    let report = recover(cfg)?;

    success(format!(
        "Rebuilt {} attendance tables from {} taps in {} log files.",
        report.identities, report.taps, report.files
    ));
    if report.new_identities > 0 {
        info(format!(
            "{} unknown cards added to the user directory.",
            report.new_identities
        ));
    }
    if report.skipped > 0 {
        warning(format!(
            "{} taps skipped: dated before their card's last recorded day.",
            report.skipped
        ));
    }

    let message = format!(
        "{} files, {} taps, {} tables ({} removed, {} taps skipped)",
        report.files, report.taps, report.identities, report.removed_tables, report.skipped
    );
    ttlog_or_warn(&cfg.database, "recover", &cfg.data_dir, &message);

    Ok(())
}
