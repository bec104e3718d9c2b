pub mod backup;
pub mod config;
pub mod export;
pub mod init;
pub mod log;
pub mod recover;
pub mod session;
pub mod stats;
pub mod users;
