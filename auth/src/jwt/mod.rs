pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::AccessClaims;
pub use claims::Expiring;
pub use claims::RefreshClaims;
pub use claims::TokenType;
pub use errors::JwtError;
pub use handler::JwtHandler;
