pub mod format;
pub mod listing;
pub mod operations;
