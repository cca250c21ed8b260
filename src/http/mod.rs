//! HTTP protocol implementation.
//!
//! A one-request-per-connection HTTP/1.1 server for a single resource, with
//! If-Modified-Since support.
//!
//! # Architecture
//!
//! - **`grammar`**: Syntax predicates for request lines, header lines and dates
//! - **`parser`**: Line-oriented reading of the request line and header block
//! - **`request`**: HTTP request representation
//! - **`outcome`**: Maps a parsed request to the one outcome that answers it
//! - **`response`**: Status codes, response builder and per-outcome rendering
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`connection`**: The per-connection state machine tying it together
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────────────┐
//!        │ AwaitingRequestLine │ ─┐
//!        └──────────┬──────────┘  │
//!                   ▼             │ bad line → Malformed
//!        ┌─────────────────────┐  │ read error → InternalError
//!        │   ParsingHeaders    │ ─┤
//!        └──────────┬──────────┘  │
//!                   ▼             │
//!        ┌─────────────────────┐  │
//!        │     Classifying     │  │
//!        └──────────┬──────────┘  │
//!                   ▼             │
//!        ┌─────────────────────┐  │
//!        │  BuildingResponse   │ ◄┘
//!        └──────────┬──────────┘
//!                   ▼
//!        ┌─────────────────────┐
//!        │       Writing       │
//!        └──────────┬──────────┘
//!                   ▼
//!                 Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use cachet::http::connection::{Connection, ServerContext};
//! use tokio::net::TcpListener;
//!
//! let listener = TcpListener::bind("127.0.0.1:8080").await?;
//! loop {
//!     let (socket, _addr) = listener.accept().await?;
//!     let ctx = ctx.clone();
//!     tokio::spawn(async move {
//!         let local = socket.local_addr().ok();
//!         if let Err(e) = Connection::new(socket, ctx, local).run().await {
//!             eprintln!("Connection error: {}", e);
//!         }
//!     });
//! }
//! ```

pub mod grammar;
pub mod request;
pub mod response;
pub mod outcome;
pub mod parser;
pub mod connection;
pub mod writer;
