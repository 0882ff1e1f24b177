//! Log Group Viewer (lgv)
//!
//! Terminal browser for log groups, their streams and the events inside a
//! stream. The pure state machine lives in [`state`]; [`view`] is the thin
//! terminal shell around it.

pub mod clipboard;
pub mod config;
pub mod formatter;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
