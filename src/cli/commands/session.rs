use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::session::Session;
use crate::errors::AppResult;
use std::io;

/// Run the interactive session on stdin/stdout until `q`.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut session = Session::open(cfg, SystemClock)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    session.run(&mut input, &mut out)
}
