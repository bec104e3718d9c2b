use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::{merge_histories, summarize};
use crate::errors::AppResult;
use crate::models::identifier::Identifier;
use crate::store::attendance::AttendanceStore;
use crate::store::directory::IdentityDirectory;
use crate::ui::screen;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { identifier } = cmd {
        let id: Identifier = identifier.parse()?;
        let rules = cfg.day_rules()?;

        let directory = IdentityDirectory::load(cfg.users_file())?;
        let identity = directory.identity(&id);
        let store = AttendanceStore::new(cfg.attendance_dir());

        // cards sharing a username are read as one person
        let linked = directory.linked(&id);
        let tables = linked
            .iter()
            .map(|card| store.load(card))
            .collect::<AppResult<Vec<_>>>()?;
        let history = merge_histories(tables.iter().map(Vec::as_slice), &rules)?;

        match summarize(&history, &rules) {
            Some(report) => {
                print!("{}", screen::stats(&identity, &report));
                if linked.len() > 1 {
                    print!("{}", screen::linked_cards(&linked));
                }
                println!();
                let today = rules.effective_date(&chrono::Utc::now());
                print!("{}", screen::heatmap(&history, today, cfg.heatmap_weeks));
            }
            None => print!("{}", screen::no_data(&identity)),
        }
    }
    Ok(())
}
