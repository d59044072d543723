//! HTTP protocol layer module
//!
//! Response construction helpers, decoupled from relay business logic.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_health_response, build_json_response, build_relay_response,
};
