//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one `GET` request per connection,
//! only the request line is read, and the connection is closed after the
//! response.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine and request pipeline
//! - **`parser`**: Splits the request line into method, target and version
//! - **`request`**: Request line and method types
//! - **`response`**: Status codes and text/binary response bodies
//! - **`writer`**: Serializes responses onto the client stream
//! - **`mime`**: Extension allow-list used to pick the content type
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read one request line
//!        └──────┬──────┘
//!               │ Line received (EOF → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← parse → method → resolve → classify → read
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response, shut down write side
//!        └──────┬───────────┘
//!               ▼
//!             Closed
//! ```
//!
//! # Pipeline
//!
//! | Check                              | Failure status |
//! |------------------------------------|----------------|
//! | exactly three tokens               | 400            |
//! | method is `GET`                    | 405            |
//! | normalized path inside the root    | 403            |
//! | extension in the MIME table        | 403            |
//! | regular file exists                | 404            |

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
