//! HTTP protocol layer module
//!
//! Response builders shared by the handlers and middleware, decoupled from routing.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_500_response, build_empty_response, build_redirect_response,
    json_error_response, json_response,
};
