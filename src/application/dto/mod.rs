//! # Data Transfer Objects
//!
//! ユースケースの入出力

pub mod open_session_input;
pub mod session_summary;
