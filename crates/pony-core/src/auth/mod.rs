//! Authentication: credential storage rules, password hashing seam, and
//! bearer-token issuance/verification.

pub mod hash;
pub mod service;
pub mod token;

pub use hash::PasswordHasher;
pub use service::AuthService;
pub use token::TokenSigner;
