pub mod config;
pub mod keys;
pub mod rank;
pub mod report;
