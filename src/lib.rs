//! viewsrc — a small HTTP relay service
//!
//! Exposes one endpoint that fetches a caller-supplied `?url=` target
//! server-side and returns the raw HTML with permissive CORS, so browser
//! front-ends can read page sources without tripping over cross-origin
//! restrictions.

pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
