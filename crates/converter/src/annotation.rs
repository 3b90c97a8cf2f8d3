//! Call-site markers consulted during converter resolution.
//!
//! The calling framework owns the annotations of a method or parameter and hands them to
//! the resolver as an ordered, read-only [`Annotations`] set.

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// A declarative marker attached to a method or parameter.
pub trait Annotation: Any + Send + Sync + Debug {}

/// Marks a response that must be handed over without materializing its body in memory.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Streaming;

impl Annotation for Streaming {}

/// An ordered collection of [`Annotation`]s.
#[derive(Clone, Debug, Default)]
pub struct Annotations {
    inner: Arc<[Arc<dyn Annotation>]>,
}

impl Annotations {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> AnnotationsBuilder {
        AnnotationsBuilder { items: vec![] }
    }

    /// Returns true if an annotation of type `A` is present
    pub fn is_present<A: Annotation>(&self) -> bool {
        self.get::<A>().is_some()
    }

    /// Returns the first annotation of type `A`
    pub fn get<A: Annotation>(&self) -> Option<&A> {
        self.inner.iter().find_map(|annotation| {
            let any: &dyn Any = &**annotation;
            any.downcast_ref::<A>()
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Annotation> {
        self.inner.iter().map(|annotation| &**annotation)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<A: Annotation> From<A> for Annotations {
    fn from(annotation: A) -> Self {
        Annotations::builder().with(annotation).build()
    }
}

#[derive(Debug)]
pub struct AnnotationsBuilder {
    items: Vec<Arc<dyn Annotation>>,
}

impl AnnotationsBuilder {
    #[must_use]
    pub fn with<A: Annotation>(mut self, annotation: A) -> Self {
        self.items.push(Arc::new(annotation));
        self
    }

    pub fn build(self) -> Annotations {
        Annotations { inner: self.items.into() }
    }
}
