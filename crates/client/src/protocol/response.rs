//! Raw HTTP response handling.
//!
//! [`RawResponse`] is what the transport hands to response converters: the parsed
//! response head, the still unread [`Payload`] and the connection resource that must be
//! given back exactly once via [`Release`].

use crate::protocol::TransportError;
use crate::protocol::body::Payload;
use http::{HeaderMap, Response, StatusCode, Version};
use std::fmt;
use std::io;
use tracing::{trace, warn};

/// Type alias for HTTP response headers.
///
/// `http::Response<()>` with an empty body placeholder, the body travels separately.
pub type ResponseHead = Response<()>;

/// The connection resource behind a raw response.
///
/// `release` is called at most once per response, either from [`RawResponse::close`] or
/// when an unclosed response is dropped.
pub trait Release: Send {
    fn release(&mut self) -> io::Result<()>;
}

/// A response as received from the transport, before any conversion.
pub struct RawResponse {
    head: ResponseHead,
    body: Option<Payload>,
    release: Option<Box<dyn Release>>,
    closed: bool,
}

impl RawResponse {
    pub fn new(head: ResponseHead, body: Payload) -> Self {
        Self { head, body: Some(body), release: None, closed: false }
    }

    /// Attaches the connection resource released by [`RawResponse::close`]
    #[must_use]
    pub fn with_release<R: Release + 'static>(mut self, release: R) -> Self {
        self.release = Some(Box::new(release));
        self
    }

    pub fn head(&self) -> &ResponseHead {
        &self.head
    }

    pub fn status(&self) -> StatusCode {
        self.head.status()
    }

    pub fn version(&self) -> Version {
        self.head.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.head.headers()
    }

    /// Returns the body, reading it is only valid before the response is closed
    pub fn body(&self) -> Result<&Payload, TransportError> {
        self.ensure_readable()?;
        self.body.as_ref().ok_or_else(Self::body_taken)
    }

    pub fn body_mut(&mut self) -> Result<&mut Payload, TransportError> {
        self.ensure_readable()?;
        self.body.as_mut().ok_or_else(Self::body_taken)
    }

    /// Takes the body out, the response stays open until closed or dropped.
    ///
    /// The body can be taken once; later calls fail instead of yielding an empty payload.
    pub fn take_body(&mut self) -> Result<Payload, TransportError> {
        self.ensure_readable()?;
        self.body.take().ok_or_else(Self::body_taken)
    }

    fn ensure_readable(&self) -> Result<(), TransportError> {
        if self.closed { Err(TransportError::Closed) } else { Ok(()) }
    }

    fn body_taken() -> TransportError {
        TransportError::invalid_body("body has been taken")
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Discards any unread body and releases the connection.
    ///
    /// Only the first call releases; later calls return `Ok(())` without side effects.
    pub fn close(&mut self) -> Result<(), TransportError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.body = None;

        if let Some(mut release) = self.release.take() {
            release.release()?;
            trace!(status = %self.head.status(), "released raw response");
        }
        Ok(())
    }
}

impl<B: Into<Payload>> From<Response<B>> for RawResponse {
    fn from(response: Response<B>) -> Self {
        let (parts, body) = response.into_parts();
        RawResponse::new(Response::from_parts(parts, ()), body.into())
    }
}

impl fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.head.status())
            .field("version", &self.head.version())
            .field("body", &self.body)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl Drop for RawResponse {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(cause = %e, "failed to release dropped response");
        }
    }
}
