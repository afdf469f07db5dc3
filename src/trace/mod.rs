pub mod activity;
pub mod logger;
