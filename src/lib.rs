//! docserve - Static File Server
//!
//! Serves files from a confined document root over plain HTTP/1.1.

pub mod config;
pub mod files;
pub mod http;
pub mod server;
