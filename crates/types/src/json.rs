// Path: crates/types/src/json.rs

//! Navigation helpers for nested JSON documents such as unpacked action data
//! and node responses.

use serde_json::Value;

/// One step of a path into a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    /// An object member.
    Key(&'a str),
    /// An array element.
    Index(usize),
}

impl<'a> From<&'a str> for PathSegment<'a> {
    fn from(key: &'a str) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Follows `path` into `value`, returning `None` as soon as a step does not exist.
pub fn deep_get<'v>(value: &'v Value, path: &[PathSegment<'_>]) -> Option<&'v Value> {
    path.iter().try_fold(value, |current, segment| match segment {
        PathSegment::Key(key) => current.as_object()?.get(*key),
        PathSegment::Index(index) => current.as_array()?.get(*index),
    })
}

/// Builds a `&[PathSegment]` from mixed string keys and integer indices.
#[macro_export]
macro_rules! json_path {
    ($($segment:expr),* $(,)?) => {
        &[$($crate::json::PathSegment::from($segment)),*]
    };
}
