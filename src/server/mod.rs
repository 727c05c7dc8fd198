//! TCP accept loop and the request log it feeds.

pub mod access_log;
pub mod listener;
