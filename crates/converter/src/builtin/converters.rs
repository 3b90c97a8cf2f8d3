//! The always-available converter catalog.
//!
//! Every converter here is stateless and exists once per process; resolution hands out
//! clones of the same `Arc`.

use crate::converter::{RequestBodyConverter, ResponseBodyConverter, StringConverter, Value};
use crate::error::ConvertError;
use crate::sentinel::Void;
use micro_client::protocol::RawResponse;
use micro_client::protocol::body::RequestBody;
use once_cell::sync::Lazy;
use std::any::type_name;
use std::fmt::Display;
use std::sync::Arc;
use tracing::trace;

pub(crate) static VOID: Lazy<Arc<dyn ResponseBodyConverter>> = Lazy::new(|| Arc::new(VoidResponseBodyConverter));
pub(crate) static UNIT: Lazy<Arc<dyn ResponseBodyConverter>> = Lazy::new(|| Arc::new(UnitResponseBodyConverter));
pub(crate) static STREAMING: Lazy<Arc<dyn ResponseBodyConverter>> =
    Lazy::new(|| Arc::new(StreamingResponseBodyConverter));
pub(crate) static BUFFERING: Lazy<Arc<dyn ResponseBodyConverter>> =
    Lazy::new(|| Arc::new(BufferingResponseBodyConverter));
pub(crate) static REQUEST_BODY: Lazy<Arc<dyn RequestBodyConverter>> =
    Lazy::new(|| Arc::new(IdentityRequestBodyConverter));
pub(crate) static TO_STRING: Lazy<Arc<dyn StringConverter>> = Lazy::new(|| Arc::new(ToStringConverter));

/// Releases the response and yields the absent value `Option::<Void>::None`.
#[derive(Debug, Default, Clone, Copy)]
pub struct VoidResponseBodyConverter;

impl ResponseBodyConverter for VoidResponseBodyConverter {
    fn convert(&self, mut response: RawResponse) -> Result<Value, ConvertError> {
        response.close()?;
        Ok(Box::new(None::<Void>))
    }
}

/// Releases the response and yields the unit value `()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnitResponseBodyConverter;

impl ResponseBodyConverter for UnitResponseBodyConverter {
    fn convert(&self, mut response: RawResponse) -> Result<Value, ConvertError> {
        response.close()?;
        Ok(Box::new(()))
    }
}

/// Hands the raw response over untouched; its body is still read lazily by the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamingResponseBodyConverter;

impl ResponseBodyConverter for StreamingResponseBodyConverter {
    fn convert(&self, response: RawResponse) -> Result<Value, ConvertError> {
        Ok(Box::new(response))
    }
}

/// Hands the raw response over as one whose body is materialized in memory.
///
/// The transport performs the buffering before conversion; this converter only marks
/// the choice and passes the response through.
#[derive(Debug, Default, Clone, Copy)]
pub struct BufferingResponseBodyConverter;

impl ResponseBodyConverter for BufferingResponseBodyConverter {
    fn convert(&self, response: RawResponse) -> Result<Value, ConvertError> {
        trace!(buffered = response.body().is_ok_and(|body| body.is_buffered()), "passing buffered response");
        Ok(Box::new(response))
    }
}

/// Passes an already encoded [`RequestBody`] through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityRequestBodyConverter;

impl RequestBodyConverter for IdentityRequestBodyConverter {
    fn convert(&self, value: Value) -> Result<RequestBody, ConvertError> {
        match value.downcast::<RequestBody>() {
            Ok(body) => Ok(*body),
            Err(_) => Err(ConvertError::type_mismatch(type_name::<RequestBody>(), "value of another type")),
        }
    }
}

/// Renders any `Display` value.
#[derive(Debug, Default, Clone, Copy)]
pub struct ToStringConverter;

impl StringConverter for ToStringConverter {
    fn convert(&self, value: &dyn Display) -> Result<String, ConvertError> {
        Ok(value.to_string())
    }
}
