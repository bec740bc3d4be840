pub mod account_request;
pub mod oauth_request;

pub use account_request::*;
pub use oauth_request::*;
