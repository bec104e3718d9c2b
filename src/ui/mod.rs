pub mod messages;
pub mod screen;
