pub mod provider;

pub use provider::{NormalizedProviderIdentity, ProviderToken, ProviderUserInfo};
