//! Interactive terminal session: one input line, one command, one response.

use crate::config::Config;
use crate::core::aggregate::{TapOutcome, apply_tap};
use crate::core::calendar::DayRules;
use crate::core::clock::Clock;
use crate::core::summary::{merge_histories, summarize};
use crate::db::initialize::open_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::identifier::Identifier;
use crate::models::record::AttendanceRecord;
use crate::models::tap::Tap;
use crate::store::attendance::AttendanceStore;
use crate::store::directory::IdentityDirectory;
use crate::store::event_log::EventLog;
use crate::ui::messages::{Level, format_message};
use crate::ui::screen;
use crate::utils::colors::CLEAR_SCREEN;
use std::collections::HashMap;
use std::io::{BufRead, Write};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tap(Identifier),
    Reset,
    Instructions,
    Stats,
    Rename,
    Quit,
    Ignored,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if let Some(id) = Identifier::parse(line) {
            return Command::Tap(id);
        }
        match line {
            "" => Command::Reset,
            "i" => Command::Instructions,
            "s" => Command::Stats,
            "u" => Command::Rename,
            other if other.eq_ignore_ascii_case("q") || other.eq_ignore_ascii_case("quit") => {
                Command::Quit
            }
            _ => Command::Ignored,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    NoIdentity,
    Active(Identifier),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<C: Clock> {
    state: SessionState,
    rules: DayRules,
    log: EventLog,
    directory: IdentityDirectory,
    store: AttendanceStore,
    histories: HashMap<Identifier, Vec<AttendanceRecord>>,
    audit: Option<DbPool>,
    clock: C,
    clear_screen: bool,
    heatmap_weeks: u32,
}

impl<C: Clock> Session<C> {
    /// Open the session over the data directory described by `cfg`.
    pub fn open(cfg: &Config, clock: C) -> AppResult<Self> {
        let audit = match open_db(&cfg.database) {
            Ok(pool) => Some(pool),
            Err(e) => {
                eprintln!("⚠️ Internal log unavailable ({}): {}", cfg.database, e);
                None
            }
        };

        Ok(Self {
            state: SessionState::NoIdentity,
            rules: cfg.day_rules()?,
            log: EventLog::new(cfg.logs_dir()),
            directory: IdentityDirectory::load(cfg.users_file())?,
            store: AttendanceStore::new(cfg.attendance_dir()),
            histories: HashMap::new(),
            audit,
            clock,
            clear_screen: cfg.clear_screen,
            heatmap_weeks: cfg.heatmap_weeks,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Read commands from `input` until quit or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> AppResult<()> {
        self.show(out, screen::GREETING)?;

        loop {
            write!(out, "{}", screen::PROMPT)?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            if self.handle_line(&line, input, out)? == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    /// Execute one input line. Command failures are shown to the user and the
    /// session carries on; only failures to write to `out` are returned.
    pub fn handle_line<R: BufRead, W: Write>(
        &mut self,
        line: &str,
        input: &mut R,
        out: &mut W,
    ) -> AppResult<Flow> {
        let command = Command::parse(line);
        if command == Command::Quit {
            return Ok(Flow::Quit);
        }

        match self.execute(command, input, out) {
            Ok(Some(text)) => self.show(out, &text)?,
            Ok(None) => {}
            Err(e) => self.show(out, &format!("{}\n", format_message(Level::Error, e)))?,
        }
        Ok(Flow::Continue)
    }

    fn execute<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        input: &mut R,
        out: &mut W,
    ) -> AppResult<Option<String>> {
        match command {
            Command::Tap(id) => self.tap(id).map(Some),
            Command::Reset => {
                self.state = SessionState::NoIdentity;
                Ok(Some(screen::GREETING.to_string()))
            }
            Command::Instructions => Ok(Some(screen::INSTRUCTIONS.to_string())),
            Command::Stats => self.stats().map(Some),
            Command::Rename => self.rename(input, out).map(Some),
            Command::Quit | Command::Ignored => Ok(None),
        }
    }

    fn show<W: Write>(&self, out: &mut W, text: &str) -> AppResult<()> {
        if self.clear_screen {
            write!(out, "{}", CLEAR_SCREEN)?;
        }
        writeln!(out, "{}", text)?;
        Ok(())
    }

    /// History of `id`, read from its table the first time it is needed.
    pub fn history(&mut self, id: &Identifier) -> AppResult<&[AttendanceRecord]> {
        if !self.histories.contains_key(id) {
            let loaded = self.store.load(id)?;
            self.histories.insert(id.clone(), loaded);
        }
        Ok(self.histories.get(id).map(Vec::as_slice).unwrap_or_default())
    }

    fn tap(&mut self, id: Identifier) -> AppResult<String> {
        // whoever tapped last is at the terminal, even if the tap fails
        self.state = SessionState::NoIdentity;

        let tap = Tap::new(self.clock.now(), id.clone());
        self.log.append(&tap)?;
        self.directory.ensure(&id)?;

        let mut next = self.history(&id)?.to_vec();
        let outcome = apply_tap(&mut next, &tap.timestamp, &self.rules)?;
        self.store.save(&id, &next)?;

        let Some(today) = next.last().cloned() else {
            return Err(AppError::NoData(id.to_string()));
        };
        self.histories.insert(id.clone(), next);
        self.state = SessionState::Active(id.clone());

        let verb = match outcome {
            TapOutcome::Opened => "opened",
            TapOutcome::Amended => "amended",
        };
        self.audit(
            "tap",
            id.as_str(),
            &format!("{} {}", verb, today.effective_date),
        );

        Ok(screen::welcome(&self.directory.identity(&id), &today))
    }

    fn stats(&mut self) -> AppResult<String> {
        let SessionState::Active(id) = self.state.clone() else {
            return Ok(screen::MUST_IDENTIFY.to_string());
        };

        let identity = self.directory.identity(&id);
        let today = self.rules.effective_date(&self.clock.now());
        let linked = self.directory.linked(&id);

        let history = if linked.len() > 1 {
            let mut parts = Vec::with_capacity(linked.len());
            for card in &linked {
                parts.push(self.history(card)?.to_vec());
            }
            merge_histories(parts.iter().map(Vec::as_slice), &self.rules)?
        } else {
            self.history(&id)?.to_vec()
        };

        let Some(report) = summarize(&history, &self.rules) else {
            return Ok(screen::no_data(&identity));
        };

        let mut text = screen::stats(&identity, &report);
        if linked.len() > 1 {
            text.push_str(&screen::linked_cards(&linked));
        }
        text.push('\n');
        text.push_str(&screen::heatmap(&history, today, self.heatmap_weeks));
        Ok(text)
    }

    fn rename<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> AppResult<String> {
        let SessionState::Active(id) = self.state.clone() else {
            return Ok(screen::MUST_IDENTIFY.to_string());
        };

        write!(out, "{}", screen::username_prompt(&self.directory.identity(&id)))?;
        out.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;
        let name = line.trim();
        if name.is_empty() {
            return Ok(screen::USERNAME_UNCHANGED.to_string());
        }

        self.directory.rename(&id, name)?;
        self.audit("rename", id.as_str(), name);

        Ok(screen::username_saved(&self.directory.identity(&id)))
    }

    // Best effort: the internal log never blocks a command.
    fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Some(pool) = &self.audit
            && let Err(e) = ttlog(&pool.conn, operation, target, message)
        {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recovery::recover;
    use chrono::{DateTime, Utc};
    use std::cell::Cell;
    use std::fs;
    use std::io::Cursor;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[derive(Clone)]
    struct TestClock(Rc<Cell<DateTime<Utc>>>);

    impl TestClock {
        fn at(ts: &str) -> Self {
            Self(Rc::new(Cell::new(utc(ts))))
        }

        fn set(&self, ts: &str) {
            self.0.set(utc(ts));
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            self.0.get()
        }
    }

    fn utc(ts: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc)
    }

    fn config(dir: &TempDir) -> Config {
        let mut cfg = Config {
            clear_screen: false,
            ..Config::default()
        };
        cfg.use_data_dir(&dir.path().to_string_lossy());
        cfg
    }

    fn id(s: &str) -> Identifier {
        Identifier::parse(s).unwrap()
    }

    /// Feed one line; `rest` is what the session may read for follow-up prompts.
    fn send(session: &mut Session<TestClock>, line: &str, rest: &str) -> (Flow, String) {
        let mut input = Cursor::new(rest.as_bytes().to_vec());
        let mut out = Vec::new();
        let flow = session.handle_line(line, &mut input, &mut out).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            Command::parse("1234567890\n"),
            Command::Tap(id("1234567890"))
        );
        assert_eq!(Command::parse("\n"), Command::Reset);
        assert_eq!(Command::parse("i"), Command::Instructions);
        assert_eq!(Command::parse("s"), Command::Stats);
        assert_eq!(Command::parse("u"), Command::Rename);
        assert_eq!(Command::parse("Q"), Command::Quit);
        assert_eq!(Command::parse("QuIt"), Command::Quit);
        assert_eq!(Command::parse("123456789"), Command::Ignored);
        assert_eq!(Command::parse("hello"), Command::Ignored);
    }

    #[test]
    fn tap_activates_identity_and_persists_everything() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);
        let clock = TestClock::at("2024-03-01T07:00:00Z");
        let mut session = Session::open(&cfg, clock.clone()).unwrap();

        let (_, text) = send(&mut session, "1234567890", "");
        assert!(text.contains("Card number"));
        assert_eq!(session.state(), &SessionState::Active(id("1234567890")));

        let log = fs::read_to_string(cfg.logs_dir().join("20240301.log")).unwrap();
        assert_eq!(log, "2024-03-01T07:00:00+00:00,1234567890\n");

        let users = fs::read_to_string(cfg.users_file()).unwrap();
        assert!(users.contains("\"1234567890\": \"1234567890\""));

        let stored = AttendanceStore::new(cfg.attendance_dir())
            .load(&id("1234567890"))
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn scenario_over_a_week() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);
        let clock = TestClock::at("2024-03-01T08:00:00+01:00");
        let mut session = Session::open(&cfg, clock.clone()).unwrap();
        let card = id("1234567890");

        send(&mut session, "1234567890", "");
        clock.set("2024-03-01T16:00:00+01:00");
        send(&mut session, "1234567890", "");
        {
            let h = session.history(&card).unwrap();
            assert_eq!(h.len(), 1);
            assert_eq!(h[0].hours_present, 8.0);
            assert_eq!(h[0].current_streak, 1);
        }

        clock.set("2024-03-04T08:00:00+01:00");
        send(&mut session, "1234567890", "");
        assert_eq!(session.history(&card).unwrap()[1].current_streak, 2);

        clock.set("2024-03-06T08:00:00+01:00");
        send(&mut session, "1234567890", "");
        let h = session.history(&card).unwrap();
        assert_eq!(h.len(), 3);
        assert_eq!(h[2].current_streak, 1);
    }

    #[test]
    fn stats_and_rename_need_a_card() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(&config(&dir), TestClock::at("2024-03-01T07:00:00Z")).unwrap();

        let (_, text) = send(&mut session, "s", "");
        assert!(text.contains("You must tap your card first"));
        let (_, text) = send(&mut session, "u", "Kari\n");
        assert!(text.contains("You must tap your card first"));
    }

    #[test]
    fn reset_forgets_the_card() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(&config(&dir), TestClock::at("2024-03-01T07:00:00Z")).unwrap();

        send(&mut session, "1234567890", "");
        let (_, text) = send(&mut session, "", "");
        assert!(text.contains("Welcome to the study hall"));
        assert_eq!(session.state(), &SessionState::NoIdentity);
    }

    #[test]
    fn rename_persists_and_changes_greeting() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);
        let mut session = Session::open(&cfg, TestClock::at("2024-03-01T07:00:00Z")).unwrap();

        send(&mut session, "1234567890", "");
        let (_, text) = send(&mut session, "u", "Kari\n");
        assert!(text.contains("Enter a username for card number 1234567890"));
        assert!(text.contains("Kari"));

        let reloaded = IdentityDirectory::load(cfg.users_file()).unwrap();
        assert_eq!(reloaded.identity(&id("1234567890")).display_name, "Kari");

        let (_, text) = send(&mut session, "1234567890", "");
        assert!(text.contains("Welcome"));
        assert!(text.contains("Kari"));
    }

    #[test]
    fn empty_username_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);
        let mut session = Session::open(&cfg, TestClock::at("2024-03-01T07:00:00Z")).unwrap();

        send(&mut session, "1234567890", "");
        let (_, text) = send(&mut session, "u", "   \n");
        assert!(text.contains("nothing changed"));
        let reloaded = IdentityDirectory::load(cfg.users_file()).unwrap();
        assert_eq!(reloaded.identity(&id("1234567890")).display_name, "1234567890");
    }

    #[test]
    fn stats_show_summary_for_active_card() {
        let dir = tempfile::tempdir().unwrap();
        let clock = TestClock::at("2024-03-01T08:00:00+01:00");
        let mut session = Session::open(&config(&dir), clock.clone()).unwrap();

        send(&mut session, "1234567890", "");
        clock.set("2024-03-01T16:00:00+01:00");
        send(&mut session, "1234567890", "");

        let (_, text) = send(&mut session, "s", "");
        assert!(text.contains("Statistics for 1234567890"));
        assert!(text.contains("1 in total"));
        assert!(text.contains("8 hours and 0 minutes"));
        assert!(text.contains("Hours per day"));
    }

    #[test]
    fn corrupt_table_is_reported_not_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);
        let store = AttendanceStore::new(cfg.attendance_dir());
        fs::create_dir_all(cfg.attendance_dir()).unwrap();
        fs::write(store.path_for(&id("1234567890")), "this is not a table\n").unwrap();

        let mut session = Session::open(&cfg, TestClock::at("2024-03-01T07:00:00Z")).unwrap();
        send(&mut session, "1111111111", "");
        assert_eq!(session.state(), &SessionState::Active(id("1111111111")));

        let (flow, text) = send(&mut session, "1234567890", "");

        assert_eq!(flow, Flow::Continue);
        assert!(text.contains("unreadable"));
        assert_eq!(session.state(), &SessionState::NoIdentity);
        assert_eq!(
            fs::read_to_string(store.path_for(&id("1234567890"))).unwrap(),
            "this is not a table\n"
        );

        // the previous card must not stay reachable
        let (_, text) = send(&mut session, "s", "");
        assert!(text.contains("You must tap your card first"));
        let (_, text) = send(&mut session, "u", "Mallory\n");
        assert!(text.contains("You must tap your card first"));
        let reloaded = IdentityDirectory::load(cfg.users_file()).unwrap();
        assert_eq!(reloaded.identity(&id("1111111111")).display_name, "1111111111");
    }

    #[test]
    fn earlier_day_is_refused_live_and_skipped_by_recovery() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);
        // 05:30 in Oslo: effective day 4 March
        let clock = TestClock::at("2024-03-04T04:30:00Z");
        let mut session = Session::open(&cfg, clock.clone()).unwrap();
        send(&mut session, "1234567890", "");

        // clock stepped back to 04:30 in Oslo: effective day 3 March, same log file
        clock.set("2024-03-04T03:30:00Z");
        let (_, text) = send(&mut session, "1234567890", "");
        assert!(text.contains("older than the last recorded day"));
        assert_eq!(session.state(), &SessionState::NoIdentity);

        clock.set("2024-03-04T12:30:00Z");
        send(&mut session, "1234567890", "");

        let store = AttendanceStore::new(cfg.attendance_dir());
        let live = fs::read(store.path_for(&id("1234567890"))).unwrap();

        let report = recover(&cfg).unwrap();
        assert_eq!(report.taps, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(fs::read(store.path_for(&id("1234567890"))).unwrap(), live);
    }

    #[test]
    fn stats_combine_cards_sharing_a_username() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);
        let clock = TestClock::at("2024-03-01T08:00:00+01:00");
        let mut session = Session::open(&cfg, clock.clone()).unwrap();

        send(&mut session, "1111111111", "");
        send(&mut session, "u", "Kari\n");
        clock.set("2024-03-04T08:00:00+01:00");
        send(&mut session, "2222222222", "");
        send(&mut session, "u", "Kari\n");

        let (_, text) = send(&mut session, "s", "");
        assert!(text.contains("Statistics for Kari"));
        assert!(text.contains("2 in total"));
        assert!(text.contains("1111111111, 2222222222"));

        // the tables themselves stay apart
        assert_eq!(session.history(&id("1111111111")).unwrap().len(), 1);
        assert_eq!(session.history(&id("2222222222")).unwrap().len(), 1);
    }

    #[test]
    fn run_stops_on_quit_and_ignores_noise() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(&config(&dir), TestClock::at("2024-03-01T07:00:00Z")).unwrap();

        let mut input = Cursor::new(b"hello\ni\nquit\n1234567890\n".to_vec());
        let mut out = Vec::new();
        session.run(&mut input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("INSTRUCTIONS"));
        // the tap after quit is never processed
        assert_eq!(session.state(), &SessionState::NoIdentity);
    }

    #[test]
    fn incremental_store_matches_recovery_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);
        let clock = TestClock::at("2024-03-01T07:00:00.123456789Z");
        let mut session = Session::open(&cfg, clock.clone()).unwrap();

        let script = [
            ("2024-03-01T07:00:00.123456789Z", "1111111111"),
            ("2024-03-01T07:30:00Z", "2222222222"),
            ("2024-03-01T15:45:10.5Z", "1111111111"),
            ("2024-03-02T01:15:00Z", "2222222222"),
            ("2024-03-04T07:05:00Z", "1111111111"),
            ("2024-03-05T08:00:00Z", "2222222222"),
            ("2024-03-06T07:00:00Z", "1111111111"),
        ];
        for (ts, card) in script {
            clock.set(ts);
            send(&mut session, card, "");
        }

        let store = AttendanceStore::new(cfg.attendance_dir());
        let read_all = || {
            ["1111111111", "2222222222"]
                .map(|c| fs::read(store.path_for(&id(c))).unwrap())
        };
        let live = read_all();

        recover(&cfg).unwrap();
        assert_eq!(read_all(), live);
    }
}
