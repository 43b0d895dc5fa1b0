use alloc::format;
use alloc::string::{String, ToString};
use core::fmt::Display;

use thiserror::Error;

/// Errors raised while resolving, serializing, deserializing or describing
/// a record.
///
/// Every variant is fatal for the operation that produced it. Malformed
/// timestamps are the one recoverable failure and never show up here, see
/// [`Observer`](crate::diagnostics::Observer).
///
/// Paths use the same notation as [`FieldPath`](crate::FieldPath):
/// `orders[2].placed_at`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapperError {
    /// A field type has no classification, or a value's shape disagrees with
    /// the declared semantic type.
    #[error("unsupported type at `{path}`: {detail}")]
    UnsupportedType { path: String, detail: String },

    /// Two fields (usually one of them inherited) share a JSON key.
    #[error("record `{record}` declares field `{field}` more than once")]
    DuplicateField {
        record: &'static str,
        field: &'static str,
    },

    /// A record contains itself through fields that must be inlined.
    #[error("record `{record}` contains itself and cannot be inlined")]
    RecursiveRecord { record: &'static str },

    #[error("`{member}` is not a member of enumeration `{enumeration}` (at `{path}`)")]
    UnknownMember {
        path: String,
        enumeration: &'static str,
        member: String,
    },

    /// The input lacks a field that has no declared default.
    #[error("missing required field `{field}` of record `{record}`")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("invalid value at `{path}`: expected {expected}, found {found}")]
    InvalidValue {
        path: String,
        expected: String,
        found: String,
    },
}

impl MapperError {
    /// An [`InvalidValue`](Self::InvalidValue) error without location.
    ///
    /// The location is attached while unwinding, see [`within_field`](Self::within_field).
    pub fn invalid(expected: impl Display, found: impl Display) -> Self {
        Self::InvalidValue {
            path: String::new(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// An [`UnsupportedType`](Self::UnsupportedType) error without location.
    pub fn unsupported(detail: impl Display) -> Self {
        Self::UnsupportedType {
            path: String::new(),
            detail: detail.to_string(),
        }
    }

    /// An [`UnknownMember`](Self::UnknownMember) error without location.
    pub fn unknown_member(enumeration: &'static str, member: impl Display) -> Self {
        Self::UnknownMember {
            path: String::new(),
            enumeration,
            member: member.to_string(),
        }
    }

    /// Returns the location of the failure, if the variant carries one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::UnsupportedType { path, .. }
            | Self::UnknownMember { path, .. }
            | Self::InvalidValue { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Replaces the location of the failure.
    pub fn at(mut self, location: impl Display) -> Self {
        if let Some(path) = self.path_mut() {
            *path = location.to_string();
        }
        self
    }

    /// Prefixes the location with a field name.
    ///
    /// ```
    /// use jsondto_mapper::MapperError;
    ///
    /// let err = MapperError::invalid("integer", "string")
    ///     .within_index(3)
    ///     .within_field("scores");
    /// assert_eq!(err.path(), Some("scores[3]"));
    /// ```
    pub fn within_field(mut self, name: &str) -> Self {
        if let Some(path) = self.path_mut() {
            *path = if path.is_empty() {
                name.to_string()
            } else if path.starts_with('[') {
                format!("{name}{path}")
            } else {
                format!("{name}.{path}")
            };
        }
        self
    }

    /// Prefixes the location with a list index.
    pub fn within_index(mut self, index: usize) -> Self {
        if let Some(path) = self.path_mut() {
            *path = if path.is_empty() || path.starts_with('[') {
                format!("[{index}]{path}")
            } else {
                format!("[{index}].{path}")
            };
        }
        self
    }

    fn path_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::UnsupportedType { path, .. }
            | Self::UnknownMember { path, .. }
            | Self::InvalidValue { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MapperError;

    #[test]
    fn nested_locations() {
        let err = MapperError::invalid("integer", "string")
            .within_field("id")
            .within_index(0)
            .within_field("users");
        assert_eq!(err.path(), Some("users[0].id"));

        let err = MapperError::unsupported("bad").within_index(1).within_index(2);
        assert_eq!(err.path(), Some("[2][1]"));
    }

    #[test]
    fn variants_without_location() {
        let err = MapperError::MissingField {
            record: "User",
            field: "id",
        }
        .within_field("owner");
        assert_eq!(err.path(), None);
        assert_eq!(
            err.to_string(),
            "missing required field `id` of record `User`"
        );
    }
}
