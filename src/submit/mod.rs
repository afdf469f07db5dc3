pub mod fill_session;
pub mod public;
pub mod submissions;
