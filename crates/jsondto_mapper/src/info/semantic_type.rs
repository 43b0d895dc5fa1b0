use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use crate::info::RecordDescriptor;
use crate::{Enumeration, MapperError, Record};

// -----------------------------------------------------------------------------
// PrimitiveKind

/// Scalar and opaque JSON kinds.
///
/// `RawObject` and `RawArray` carry no further structure; their content is
/// passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Integer,
    Float,
    Boolean,
    String,
    RawObject,
    RawArray,
}

impl PrimitiveKind {
    /// The draft-04 `type` keyword for this kind.
    pub const fn schema_type(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "number",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::RawObject => "object",
            Self::RawArray => "array",
        }
    }

    /// Whether values of this kind can be rendered as a JSON object key.
    pub const fn is_key(self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Float | Self::Boolean | Self::String
        )
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.pad("integer"),
            Self::Float => f.pad("float"),
            Self::Boolean => f.pad("boolean"),
            Self::String => f.pad("string"),
            Self::RawObject => f.pad("raw object"),
            Self::RawArray => f.pad("raw array"),
        }
    }
}

// -----------------------------------------------------------------------------
// EnumType

/// Identity and closed member set of an [`Enumeration`].
#[derive(Clone, Copy)]
pub struct EnumType {
    ty_id: TypeId,
    name: &'static str,
    members: &'static [&'static str],
}

impl EnumType {
    #[inline]
    pub fn of<T: Enumeration>() -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            name: T::NAME,
            members: T::MEMBERS,
        }
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Symbolic names in declaration order.
    #[inline]
    pub const fn members(&self) -> &'static [&'static str] {
        self.members
    }

    /// Returns the interned member name equal to `name`, if any.
    pub fn member(&self, name: &str) -> Option<&'static str> {
        self.members.iter().copied().find(|member| *member == name)
    }
}

impl fmt::Debug for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumType")
            .field("name", &self.name)
            .field("members", &self.members)
            .finish()
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.ty_id == other.ty_id
    }
}

impl Eq for EnumType {}

// -----------------------------------------------------------------------------
// RecordType

/// Identity of a nested [`Record`].
///
/// The descriptor is reached through a function pointer and only resolved
/// on use, so a record may refer to itself (`children: Vec<Node>`).
#[derive(Clone, Copy)]
pub struct RecordType {
    ty_id: TypeId,
    name: &'static str,
    descriptor: fn() -> Result<&'static RecordDescriptor, MapperError>,
}

impl RecordType {
    #[inline]
    pub fn of<T: Record>() -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            name: T::NAME,
            descriptor: T::descriptor,
        }
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Resolves (or fetches the cached) descriptor of the record.
    #[inline]
    pub fn descriptor(&self) -> Result<&'static RecordDescriptor, MapperError> {
        (self.descriptor)()
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordType").field(&self.name).finish()
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.ty_id == other.ty_id
    }
}

impl Eq for RecordType {}

// -----------------------------------------------------------------------------
// SemanticType

/// The declared shape of a field.
///
/// Obtained from [`FieldValue::semantic_type`](crate::value::FieldValue::semantic_type).
///
/// ```
/// use std::collections::HashMap;
/// use jsondto_mapper::info::{PrimitiveKind, SemanticType};
/// use jsondto_mapper::value::FieldValue;
///
/// assert_eq!(
///     <HashMap<String, Vec<i32>>>::semantic_type(),
///     SemanticType::map_of(
///         SemanticType::Primitive(PrimitiveKind::String),
///         SemanticType::list_of(SemanticType::Primitive(PrimitiveKind::Integer)),
///     ),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticType {
    Primitive(PrimitiveKind),
    /// A point in time, encoded as `YYYY-MM-DD HH:MM:SS±HHMM`.
    Timestamp,
    Enumeration(EnumType),
    Record(RecordType),
    ListOf(Box<SemanticType>),
    /// Key descriptor, value descriptor.
    MapOf(Box<SemanticType>, Box<SemanticType>),
    /// A list item or map value that may be `null` (`Option<T>`).
    ///
    /// Record fields never carry it; a nullable field is one that is not
    /// required.
    Nullable(Box<SemanticType>),
}

impl SemanticType {
    #[inline]
    pub fn list_of(element: SemanticType) -> Self {
        Self::ListOf(Box::new(element))
    }

    #[inline]
    pub fn map_of(key: SemanticType, value: SemanticType) -> Self {
        Self::MapOf(Box::new(key), Box::new(value))
    }

    /// Marks the type as accepting `null`. Idempotent.
    pub fn nullable(self) -> Self {
        match self {
            Self::Nullable(_) => self,
            other => Self::Nullable(Box::new(other)),
        }
    }

    /// Strips a [`Nullable`](Self::Nullable) marker.
    pub fn into_non_null(self) -> Self {
        match self {
            Self::Nullable(inner) => *inner,
            other => other,
        }
    }

    /// Whether values of this type can be rendered as a JSON object key.
    pub const fn is_key(&self) -> bool {
        match self {
            Self::Primitive(kind) => kind.is_key(),
            Self::Timestamp | Self::Enumeration(_) => true,
            Self::Record(_) | Self::ListOf(_) | Self::MapOf(..) | Self::Nullable(_) => false,
        }
    }

    /// Checks the parts of the shape that the type system cannot: map keys
    /// must render as JSON object keys.
    ///
    /// Nested records are not entered; they are checked when resolved.
    pub fn validate(&self) -> Result<(), MapperError> {
        match self {
            Self::Primitive(_) | Self::Timestamp | Self::Enumeration(_) | Self::Record(_) => Ok(()),
            Self::ListOf(element) | Self::Nullable(element) => element.validate(),
            Self::MapOf(key, value) => {
                if !key.is_key() {
                    return Err(MapperError::unsupported(alloc::format!(
                        "{key} cannot be used as a map key"
                    )));
                }
                value.validate()
            }
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => fmt::Display::fmt(kind, f),
            Self::Timestamp => f.write_str("timestamp"),
            Self::Enumeration(info) => write!(f, "enumeration `{}`", info.name()),
            Self::Record(info) => write!(f, "record `{}`", info.name()),
            Self::ListOf(element) => write!(f, "list of {element}"),
            Self::MapOf(key, value) => write!(f, "map of {key} to {value}"),
            Self::Nullable(inner) => write!(f, "nullable {inner}"),
        }
    }
}
