//! Body types shared by raw responses and outgoing requests.
//!
//! - [`Payload`]: in-memory or streamed bytes implementing `http_body::Body`
//! - [`RequestBody`]: an already encoded outgoing body with its content type

mod payload;
mod request_body;

pub use payload::Payload;
pub use request_body::RequestBody;
