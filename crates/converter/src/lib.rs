//! Body converter resolution for the micro HTTP client.
//!
//! Every endpoint declares a return type and, for requests with a body, a parameter
//! type. This crate decides how a raw network response becomes that return value and
//! how that parameter becomes an outgoing body.
//!
//! # Example
//!
//! ```
//! use micro_client::protocol::RawResponse;
//! use micro_converter::{Annotations, Converters, Streaming, TargetType};
//!
//! let converters = Converters::default();
//! let converter =
//!     converters.response_body_converter(&TargetType::of::<RawResponse>(), &Annotations::from(Streaming))?;
//!
//! let value = converter.convert(RawResponse::from(http::Response::new("hello")))?;
//! let response = value.downcast::<RawResponse>().map_err(|_| "not a raw response")?;
//! assert!(!response.is_closed());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! - [`target_type`]: [`TargetType`] descriptors used as dispatch keys
//! - [`annotation`]: call-site markers such as [`Streaming`]
//! - [`converter`]: the converter capabilities and the [`ConverterFactory`] seam
//! - [`builtin`]: [`BuiltInConverters`], the always-available factory and its catalog
//! - [`registry`]: [`Converters`], the ordered chain of factories
//! - [`sentinel`]: the [`Void`] and optional unit sentinel types
//!
//! # Resolution
//!
//! Factories are asked in order and the first one returning `Some` wins. `None` means
//! "no opinion" and is never an error by itself; only a registry that ran out of
//! factories reports [`ConvertError::NoConverter`]. Failures while releasing or reading
//! the response happen inside `convert` and surface as [`ConvertError::Transport`].
//!
//! # Feature Flags
//!
//! - `unit` (default): the unit sentinel `()` resolves to a converter that releases the
//!   response and returns `()`

pub mod annotation;
pub mod builtin;
pub mod converter;
pub mod registry;
pub mod sentinel;
pub mod target_type;

mod error;

pub use annotation::{Annotation, Annotations, Streaming};
pub use builtin::BuiltInConverters;
pub use converter::{ConverterFactory, RequestBodyConverter, ResponseBodyConverter, StringConverter, Value};
pub use error::{ConvertError, ConverterKind, FeatureUnavailable};
pub use registry::{Converters, ConvertersBuilder};
pub use sentinel::{RuntimeSentinels, SentinelProvider, Void};
pub use target_type::{RawType, TargetType};
