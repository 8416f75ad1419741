//! Data model shared by the transport, the session store and front ends.

mod api_url;
mod credentials;
mod envelope;
mod payloads;
mod user;

pub use api_url::{ApiBaseUrl, SchemePolicy};
pub use credentials::{Credentials, RegisterRequest, SendVerifyCodeRequest};
pub use envelope::{Envelope, NON_NUMERIC_CODE};
pub use payloads::{AuthResponse, PublicSettings, SendVerifyCodeResponse};
pub use user::{Role, User};
