/// Session-oriented editor API.
pub mod editor_session;
