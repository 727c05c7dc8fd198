//! Document root access: target resolution and error page rendering.

pub mod error_page;
pub mod resolver;
