pub mod token;

pub use token::{IssuedToken, TokenClaims, TokenKind, TokenPair};
