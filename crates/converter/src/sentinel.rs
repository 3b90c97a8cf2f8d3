//! Sentinel types standing for "no meaningful payload".
//!
//! [`Void`] is always available and means no return value is expected at all. The unit
//! sentinel `()` is optional: it only exists when the build enables the `unit` feature,
//! and its availability is reported by a [`SentinelProvider`].

use crate::error::FeatureUnavailable;
use crate::target_type::TargetType;
use std::fmt::Debug;

/// The absent-value marker. Declaring it means the caller expects no value back; it has
/// no instances, a conversion to it yields `Option::<Void>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Void {}

/// Reports which optional sentinel types exist in this build.
pub trait SentinelProvider: Send + Sync + Debug {
    /// Returns the unit sentinel type, or [`FeatureUnavailable`] when it is not supported
    fn unit_type(&self) -> Result<TargetType, FeatureUnavailable>;
}

/// Sentinel availability as compiled into this crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuntimeSentinels;

impl SentinelProvider for RuntimeSentinels {
    fn unit_type(&self) -> Result<TargetType, FeatureUnavailable> {
        if cfg!(feature = "unit") {
            Ok(TargetType::of::<()>())
        } else {
            Err(FeatureUnavailable::new("()"))
        }
    }
}
