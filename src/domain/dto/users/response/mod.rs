pub mod api_response;
pub mod account_response;

pub use api_response::ApiResponse;
pub use account_response::*;
