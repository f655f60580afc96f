pub mod error;
pub mod time_range;
