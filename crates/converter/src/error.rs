use crate::target_type::TargetType;
use micro_client::protocol::TransportError;
use std::fmt;
use thiserror::Error;

/// Which side of the exchange a converter was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterKind {
    Response,
    Request,
}

impl fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConverterKind::Response => f.write_str("response body"),
            ConverterKind::Request => f.write_str("request body"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("could not locate {kind} converter for {target}, tried {tried} factories")]
    NoConverter { kind: ConverterKind, target: TargetType, tried: usize },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: String },

    #[error("transport error: {source}")]
    Transport {
        #[from]
        source: TransportError,
    },
}

impl ConvertError {
    pub fn no_converter(kind: ConverterKind, target: &TargetType, tried: usize) -> Self {
        Self::NoConverter { kind, target: target.clone(), tried }
    }

    pub fn type_mismatch<S: ToString>(expected: &'static str, found: S) -> Self {
        Self::TypeMismatch { expected, found: found.to_string() }
    }
}

/// An optional runtime sentinel type is not present in this build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("sentinel type `{sentinel}` is unavailable")]
pub struct FeatureUnavailable {
    pub sentinel: &'static str,
}

impl FeatureUnavailable {
    pub fn new(sentinel: &'static str) -> Self {
        Self { sentinel }
    }
}
