use crate::protocol::TransportError;
use crate::protocol::body::Payload;
use bytes::Bytes;
use http_body::Body as HttpBody;
use mime::Mime;

/// An already encoded outgoing request body.
///
/// Holds the declared content type next to the payload; converters that receive a
/// `RequestBody` hand it to the transport untouched.
#[derive(Debug, Default)]
pub struct RequestBody {
    content_type: Option<Mime>,
    payload: Payload,
}

impl RequestBody {
    pub fn new(content_type: Option<Mime>, payload: Payload) -> Self {
        Self { content_type, payload }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bytes(content_type: Mime, bytes: impl Into<Bytes>) -> Self {
        let bytes: Bytes = bytes.into();
        Self::new(Some(content_type), Payload::from(bytes))
    }

    /// Creates a `text/plain; charset=utf-8` body
    pub fn text(text: impl Into<String>) -> Self {
        let text: String = text.into();
        Self::new(Some(mime::TEXT_PLAIN_UTF_8), Payload::from(text))
    }

    pub fn stream<B>(content_type: Mime, body: B) -> Self
    where
        B: HttpBody<Data = Bytes, Error = TransportError> + Send + 'static,
    {
        Self::new(Some(content_type), Payload::stream(body))
    }

    pub fn content_type(&self) -> Option<&Mime> {
        self.content_type.as_ref()
    }

    /// Returns the exact length when it is known up front, `None` for unsized streams
    pub fn content_length(&self) -> Option<u64> {
        self.payload.size_hint().exact()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }
}
