// Path: crates/abi/src/schema/descriptor.rs

//! Field type descriptors: a type name plus at most one trailing modifier.

/// A trailing modifier on a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `?`: a presence byte followed by the value when present.
    Optional,
    /// `$`: a trailing binary extension that may be absent.
    Extension,
}

/// A field type split into its base type and modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldType<'a> {
    /// The type name without the modifier.
    pub base: &'a str,
    /// The modifier, if any.
    pub modifier: Option<Modifier>,
}

impl<'a> FieldType<'a> {
    /// Splits a descriptor such as `asset?` or `string$`.
    pub fn parse(ty: &'a str) -> Self {
        if let Some(base) = ty.strip_suffix('?') {
            Self {
                base,
                modifier: Some(Modifier::Optional),
            }
        } else if let Some(base) = ty.strip_suffix('$') {
            Self {
                base,
                modifier: Some(Modifier::Extension),
            }
        } else {
            Self {
                base: ty,
                modifier: None,
            }
        }
    }
}

/// The element type of an array descriptor `T[]`.
pub fn array_element(ty: &str) -> Option<&str> {
    ty.strip_suffix("[]")
}
