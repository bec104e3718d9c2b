pub mod identifier;
pub mod identity;
pub mod record;
pub mod stats;
pub mod tap;
