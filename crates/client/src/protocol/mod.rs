//! Transport-facing protocol types.
//!
//! - **Responses**: [`RawResponse`], [`ResponseHead`] and the [`Release`] hook for the
//!   connection resource
//! - **Bodies** ([`body`]): [`body::Payload`] and [`body::RequestBody`]
//! - **Errors**: [`TransportError`]

mod error;
pub use error::TransportError;

mod response;
pub use response::RawResponse;
pub use response::Release;
pub use response::ResponseHead;

pub mod body;
