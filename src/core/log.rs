use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;

fn strip_ansi(s: &str) -> String {
    match Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

/// Colour used for each operation in the internal log.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "tap" => Colour::Green,
        "rename" => Colour::Yellow,
        "recover" => Colour::Purple,
        "backup" => Colour::Blue,
        "export" => Colour::Cyan,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

const OP_WIDTH_MAX: usize = 60;

/// Render log entries as aligned, coloured lines.
pub fn render_log(entries: &[LogEntry]) -> Vec<String> {
    let op_targets: Vec<String> = entries
        .iter()
        .map(|e| {
            let op = color_for_operation(&e.operation).paint(e.operation.as_str());
            if e.target.is_empty() {
                op.to_string()
            } else {
                format!("{} ({})", op, e.target)
            }
        })
        .collect();

    let op_w = op_targets
        .iter()
        .map(|s| strip_ansi(s).chars().count())
        .max()
        .unwrap_or(10)
        .min(OP_WIDTH_MAX);
    let id_w = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .max()
        .unwrap_or(1);

    entries
        .iter()
        .zip(op_targets)
        .map(|(e, op_target)| {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| e.date.clone());
            let visible = strip_ansi(&op_target).chars().count();
            let padding = " ".repeat(op_w.saturating_sub(visible));
            format!(
                "{:>id_w$}: {} | {}{} => {}",
                e.id,
                date,
                op_target,
                padding,
                e.message,
                id_w = id_w
            )
        })
        .collect()
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");
        for line in render_log(&entries) {
            println!("{}", line);
        }
        Ok(())
    }
}
