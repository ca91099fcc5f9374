//! `artisanhome-auth`: stateless session tokens, role gating, credential login.
//!
//! Decoupled from HTTP and storage: the API crate feeds in header values and a
//! [`UserDirectory`].

pub mod authorize;
pub mod claims;
pub mod password;
pub mod principal;
pub mod roles;
pub mod token;
pub mod user;

pub use authorize::{AuthError, Authenticated, Guard, extract_bearer};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use password::{PasswordError, hash_password, hash_password_with_cost, verify_password};
pub use principal::Principal;
pub use roles::{Role, UnknownRole};
pub use token::{Hs256JwtCodec, IssuedToken, JwtValidator, TokenError, TokenIssuer};
pub use user::{
    InMemoryUserDirectory, LoginError, LoginSession, UserAccount, UserDirectory, UserProfile, login,
};
