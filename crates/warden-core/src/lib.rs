//! warden-core - Core types and traits for the warden session client.
//!
//! Everything above the transport speaks in these types: the [`User`] a
//! session holds, the payloads of the auth endpoints, the normalized
//! [`Error`] taxonomy, and the two seams the rest of the workspace plugs
//! into ([`AuthApi`] and [`Navigator`]).

pub mod error;
pub mod traits;
pub mod types;

pub use error::{
    ApplicationError, AuthorizationError, Error, InvalidInputError, NetworkError, StatusError,
};
pub use traits::{AuthApi, LOGIN_PATH, MemoryNavigator, Navigator};
pub use types::{
    ApiBaseUrl, AuthResponse, Credentials, Envelope, NON_NUMERIC_CODE, PublicSettings,
    RegisterRequest, Role, SchemePolicy, SendVerifyCodeRequest, SendVerifyCodeResponse, User,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
