//! Explicit partial-update values.

/// A single field of a partial update: either left untouched or set.
///
/// Unlike a "zero value means unchanged" convention, an empty string can be
/// written deliberately with `FieldPatch::Set(String::new())`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldPatch<T> {
    /// The field keeps its stored value.
    #[default]
    Unset,
    /// The field is overwritten with the value.
    Set(T),
}

impl<T> FieldPatch<T> {
    /// Returns `true` when the patch leaves the field untouched.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns the value to write, if any.
    #[must_use]
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Unset => None,
            Self::Set(value) => Some(value),
        }
    }

    /// Overwrites `target` with the patched value when set.
    pub fn apply_to(&self, target: &mut T)
    where
        T: Clone,
    {
        if let Self::Set(value) = self {
            target.clone_from(value);
        }
    }

    /// Converts the patched value with a fallible mapping.
    ///
    /// # Errors
    ///
    /// Returns the mapping error when the field is set and the mapping fails.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<FieldPatch<U>, E> {
        match self {
            Self::Unset => Ok(FieldPatch::Unset),
            Self::Set(value) => f(value).map(FieldPatch::Set),
        }
    }
}

impl<T> From<Option<T>> for FieldPatch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Set)
    }
}
