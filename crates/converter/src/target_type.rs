//! Reified type descriptors used as converter dispatch keys.
//!
//! A [`TargetType`] describes the declared return or parameter type of an endpoint: the
//! erased [`RawType`], its generic arguments and the supertypes its values may be used
//! as. Descriptors are built once at setup time and never change afterwards.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The erased form of a type, compared by `TypeId`.
#[derive(Clone, Copy, Debug)]
pub struct RawType {
    id: TypeId,
    name: &'static str,
}

impl RawType {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self { id: TypeId::of::<T>(), name: type_name::<T>() }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for RawType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RawType {}

impl Hash for RawType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A declared type: raw type, generic arguments and declared supertypes.
///
/// Equality covers the raw type and the arguments; supertypes are extra knowledge about
/// the type and do not take part in identity.
#[derive(Clone, Debug)]
pub struct TargetType {
    raw: RawType,
    args: Arc<[TargetType]>,
    supertypes: Arc<[RawType]>,
}

impl TargetType {
    /// The bare type `T`, without generic arguments
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self { raw: RawType::of::<T>(), args: Arc::new([]), supertypes: Arc::new([]) }
    }

    /// `T` applied to `args`, e.g. `Page<User>` as `parameterized::<Page<()>>([of::<User>()])`
    pub fn parameterized<T: ?Sized + 'static>(args: impl IntoIterator<Item = TargetType>) -> Self {
        Self { raw: RawType::of::<T>(), args: args.into_iter().collect(), supertypes: Arc::new([]) }
    }

    /// Declares that values of this type can be used where `S` is expected
    #[must_use]
    pub fn with_supertype<S: ?Sized + 'static>(self) -> Self {
        let supertype = RawType::of::<S>();
        if self.raw == supertype || self.supertypes.contains(&supertype) {
            return self;
        }
        let supertypes = self.supertypes.iter().copied().chain(std::iter::once(supertype)).collect();
        Self { supertypes, ..self }
    }

    /// The erased form of this type
    pub fn raw_type(&self) -> RawType {
        self.raw
    }

    pub fn args(&self) -> &[TargetType] {
        &self.args
    }

    pub fn supertypes(&self) -> &[RawType] {
        &self.supertypes
    }

    pub fn is_parameterized(&self) -> bool {
        !self.args.is_empty()
    }

    /// Exact match: the bare type `T`. A parameterized type never matches exactly.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.raw.is::<T>() && self.args.is_empty()
    }

    /// True if the erased type is `T` or declares `T` as a supertype
    pub fn is_assignable_to<T: ?Sized + 'static>(&self) -> bool {
        self.raw.is::<T>() || self.supertypes.iter().any(RawType::is::<T>)
    }
}

impl PartialEq for TargetType {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw && self.args == other.args
    }
}

impl Eq for TargetType {}

impl Hash for TargetType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
        self.args.hash(state);
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{RawType, TargetType};

    struct Page<T>(Vec<T>);
    struct User;
    trait Body {}

    #[test]
    fn bare_type_matches_exactly() {
        let ty = TargetType::of::<User>();
        assert!(ty.is::<User>());
        assert!(!ty.is::<String>());
        assert_eq!(ty, TargetType::of::<User>());
    }

    #[test]
    fn parameterized_type_is_not_an_exact_match() {
        let ty = TargetType::parameterized::<Page<()>>([TargetType::of::<User>()]);

        assert!(!ty.is::<Page<()>>());
        assert!(ty.raw_type().is::<Page<()>>());
        assert!(ty.is_parameterized());
        assert_eq!(ty.args(), &[TargetType::of::<User>()]);
        assert_ne!(ty, TargetType::of::<Page<()>>());
    }

    #[test]
    fn supertypes_make_types_assignable() {
        let ty = TargetType::of::<User>().with_supertype::<dyn Body>().with_supertype::<dyn Body>();

        assert!(ty.is_assignable_to::<User>());
        assert!(ty.is_assignable_to::<dyn Body>());
        assert!(!ty.is_assignable_to::<String>());
        assert_eq!(ty.supertypes(), &[RawType::of::<dyn Body>()]);
        assert_eq!(ty, TargetType::of::<User>());
    }

    #[test]
    fn display_includes_arguments() {
        let ty = TargetType::parameterized::<Page<()>>([TargetType::of::<u8>(), TargetType::of::<u16>()]);
        let rendered = ty.to_string();
        assert!(rendered.contains("Page"));
        assert!(rendered.ends_with("<u8, u16>"));
    }
}
