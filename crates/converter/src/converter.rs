//! Converter capabilities and the factory seam.
//!
//! A converter turns one representation into another and may fail with a
//! [`ConvertError`]. Factories decide, per declared type and annotations, which converter
//! applies; returning `None` means "no opinion" and lets the next factory answer.

use crate::annotation::Annotations;
use crate::error::ConvertError;
use crate::target_type::TargetType;
use micro_client::protocol::RawResponse;
use micro_client::protocol::body::RequestBody;
use std::any::Any;
use std::fmt::{Debug, Display};
use std::sync::Arc;

/// A converted value whose concrete type is described by the resolved [`TargetType`].
pub type Value = Box<dyn Any + Send>;

/// Turns a raw response into the declared return value.
pub trait ResponseBodyConverter: Send + Sync + Debug {
    fn convert(&self, response: RawResponse) -> Result<Value, ConvertError>;
}

/// Turns a declared parameter value into an outgoing body.
pub trait RequestBodyConverter: Send + Sync + Debug {
    fn convert(&self, value: Value) -> Result<RequestBody, ConvertError>;
}

/// Renders a parameter value as a string, e.g. for paths, queries and headers.
pub trait StringConverter: Send + Sync + Debug {
    fn convert(&self, value: &dyn Display) -> Result<String, ConvertError>;
}

/// Creates converters for the types and annotations it understands.
///
/// Every method defaults to `None`, so a factory only implements the directions it
/// handles. Returning `None` is not an error; it passes the decision on to the next
/// factory in the registry.
pub trait ConverterFactory: Send + Sync + Debug {
    fn response_body_converter(
        &self,
        _target: &TargetType,
        _annotations: &Annotations,
    ) -> Option<Arc<dyn ResponseBodyConverter>> {
        None
    }

    fn request_body_converter(
        &self,
        _target: &TargetType,
        _param_annotations: &Annotations,
        _method_annotations: &Annotations,
    ) -> Option<Arc<dyn RequestBodyConverter>> {
        None
    }

    fn string_converter(&self, _target: &TargetType, _annotations: &Annotations) -> Option<Arc<dyn StringConverter>> {
        None
    }
}
