//! Built-in converter resolution.
//!
//! [`BuiltInConverters`] is the factory consulted before any user factory. It only has
//! an opinion about the transport's own types and the sentinel types:
//!
//! - [`RawResponse`]: streaming or buffering passthrough, chosen by [`Streaming`]
//! - [`Void`]: release the response, return nothing
//! - `()`: release the response, return unit, if the unit sentinel is available
//! - [`RequestBody`] and its declared subtypes: identity
//!
//! Everything else gets `None`.

mod converters;

pub use converters::BufferingResponseBodyConverter;
pub use converters::IdentityRequestBodyConverter;
pub use converters::StreamingResponseBodyConverter;
pub use converters::ToStringConverter;
pub use converters::UnitResponseBodyConverter;
pub use converters::VoidResponseBodyConverter;

use crate::annotation::{Annotations, Streaming};
use crate::converter::{ConverterFactory, RequestBodyConverter, ResponseBodyConverter, StringConverter};
use crate::sentinel::{RuntimeSentinels, SentinelProvider, Void};
use crate::target_type::TargetType;
use micro_client::protocol::RawResponse;
use micro_client::protocol::body::RequestBody;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

static SHARED: Lazy<Arc<BuiltInConverters>> = Lazy::new(|| Arc::new(BuiltInConverters::new()));

#[derive(Debug)]
pub struct BuiltInConverters {
    /// Starts true and only ever moves to false, once the unit sentinel is reported
    /// unavailable. Racing threads all compute the same probe result, so relaxed
    /// loads and stores are enough.
    check_for_unit: AtomicBool,
    sentinels: Arc<dyn SentinelProvider>,
}

impl BuiltInConverters {
    pub fn new() -> Self {
        Self::with_sentinels(RuntimeSentinels)
    }

    /// Uses `sentinels` to find out whether the unit sentinel exists
    pub fn with_sentinels<P: SentinelProvider + 'static>(sentinels: P) -> Self {
        Self { check_for_unit: AtomicBool::new(true), sentinels: Arc::new(sentinels) }
    }

    /// The process-wide instance
    pub fn shared() -> Arc<BuiltInConverters> {
        Arc::clone(&SHARED)
    }

    /// Returns false once the unit sentinel has been found unavailable
    pub fn checks_for_unit(&self) -> bool {
        self.check_for_unit.load(Ordering::Relaxed)
    }

    pub fn void() -> Arc<dyn ResponseBodyConverter> {
        Arc::clone(&converters::VOID)
    }

    pub fn unit() -> Arc<dyn ResponseBodyConverter> {
        Arc::clone(&converters::UNIT)
    }

    pub fn streaming() -> Arc<dyn ResponseBodyConverter> {
        Arc::clone(&converters::STREAMING)
    }

    pub fn buffering() -> Arc<dyn ResponseBodyConverter> {
        Arc::clone(&converters::BUFFERING)
    }

    pub fn request_body() -> Arc<dyn RequestBodyConverter> {
        Arc::clone(&converters::REQUEST_BODY)
    }

    pub fn to_string_converter() -> Arc<dyn StringConverter> {
        Arc::clone(&converters::TO_STRING)
    }

    fn unit_converter(&self, target: &TargetType) -> Option<Arc<dyn ResponseBodyConverter>> {
        if !self.check_for_unit.load(Ordering::Relaxed) {
            return None;
        }

        match self.sentinels.unit_type() {
            Ok(unit) if *target == unit => Some(Self::unit()),
            Ok(_) => None,
            Err(unavailable) => {
                debug!(cause = %unavailable, "unit sentinel unavailable, stop checking for it");
                self.check_for_unit.store(false, Ordering::Relaxed);
                None
            }
        }
    }
}

impl Default for BuiltInConverters {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterFactory for BuiltInConverters {
    fn response_body_converter(
        &self,
        target: &TargetType,
        annotations: &Annotations,
    ) -> Option<Arc<dyn ResponseBodyConverter>> {
        if target.is::<RawResponse>() {
            return if annotations.is_present::<Streaming>() { Some(Self::streaming()) } else { Some(Self::buffering()) };
        }
        if target.is::<Void>() {
            return Some(Self::void());
        }
        self.unit_converter(target)
    }

    fn request_body_converter(
        &self,
        target: &TargetType,
        _param_annotations: &Annotations,
        _method_annotations: &Annotations,
    ) -> Option<Arc<dyn RequestBodyConverter>> {
        target.is_assignable_to::<RequestBody>().then(Self::request_body)
    }
}
