pub mod per_minute;
pub mod token;
