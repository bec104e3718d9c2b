pub mod aggregate;
pub mod backup;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod export;
pub mod log;
pub mod recovery;
pub mod session;
pub mod summary;
