use crate::info::SemanticType;

/// One entry of a [`RecordDescriptor`](crate::info::RecordDescriptor).
///
/// `required` is true when the field has no declared default: no
/// `#[dto(default)]` and not an `Option`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    semantic_type: SemanticType,
    required: bool,
}

impl FieldDescriptor {
    #[inline]
    pub const fn new(name: &'static str, semantic_type: SemanticType, required: bool) -> Self {
        Self {
            name,
            semantic_type,
            required,
        }
    }

    /// The JSON key of the field.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn semantic_type(&self) -> &SemanticType {
        &self.semantic_type
    }

    #[inline]
    pub const fn required(&self) -> bool {
        self.required
    }
}
