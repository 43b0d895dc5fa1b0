use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;

use hashbrown::HashMap;

use crate::info::FieldDescriptor;
use crate::utils::FixedHashState;
use crate::value::FieldValue;
use crate::{MapperError, Record};

// -----------------------------------------------------------------------------
// RecordDescriptor

/// Ordered field list of a [`Record`] type.
///
/// Fields inherited through `#[dto(flatten)]` appear at the position of the
/// flattened field. Field names are unique.
///
/// Usually obtained from [`resolve`](crate::resolve), which caches one
/// `&'static` instance per type.
///
/// ```
/// use jsondto_mapper::{derive::Record, resolve};
///
/// #[derive(Record)]
/// struct Point {
///     x: i32,
///     #[dto(default)]
///     y: i32,
/// }
///
/// let info = resolve::<Point>().unwrap();
/// assert_eq!(info.name(), "Point");
/// assert_eq!(info.len(), 2);
/// assert!(info.field("x").unwrap().required());
/// assert!(!info.field("y").unwrap().required());
/// ```
#[derive(Debug)]
pub struct RecordDescriptor {
    name: &'static str,
    ty_id: TypeId,
    fields: Box<[FieldDescriptor]>,
    indices: HashMap<&'static str, usize, FixedHashState>,
}

impl RecordDescriptor {
    /// Starts a descriptor for `T`.
    #[inline]
    pub fn builder<T: Record>() -> RecordBuilder {
        RecordBuilder {
            name: T::NAME,
            ty_id: TypeId::of::<T>(),
            fields: Vec::new(),
        }
    }

    /// The record name, used as the schema title.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Returns the field with the given JSON key.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.indices.get(name).map(|&index| &self.fields[index])
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// Returns the index of the field with the given JSON key.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Iterates fields in declaration order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Iterates the names of required fields in declaration order.
    pub fn required(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|field| field.required())
            .map(FieldDescriptor::name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordDescriptor {
    type Item = &'a FieldDescriptor;
    type IntoIter = core::slice::Iter<'a, FieldDescriptor>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

// -----------------------------------------------------------------------------
// RecordBuilder

/// Assembles a [`RecordDescriptor`], see [`RecordDescriptor::builder`].
///
/// Generated by `#[derive(Record)]`; hand-written [`Record`] impls use it
/// the same way.
pub struct RecordBuilder {
    name: &'static str,
    ty_id: TypeId,
    fields: Vec<FieldDescriptor>,
}

impl RecordBuilder {
    /// Appends a field of type `T`.
    ///
    /// The field is required unless it has a declared default or `T` is
    /// nullable (`Option<_>`).
    pub fn field<T: FieldValue>(mut self, name: &'static str, has_default: bool) -> Self {
        let required = !has_default && !T::NULLABLE;
        let semantic_type = T::semantic_type().into_non_null();
        self.fields
            .push(FieldDescriptor::new(name, semantic_type, required));
        self
    }

    /// Splices in the fields of the base record `T`.
    ///
    /// Fails when the base cannot be resolved, including when it is the
    /// record being built.
    pub fn flatten<T: Record>(mut self) -> Result<Self, MapperError> {
        let base = T::descriptor()?;
        self.fields.extend(base.iter().cloned());
        Ok(self)
    }

    /// Validates map key types and field name uniqueness.
    pub fn build(self) -> Result<RecordDescriptor, MapperError> {
        let mut indices = HashMap::with_capacity_and_hasher(self.fields.len(), FixedHashState);

        for (index, field) in self.fields.iter().enumerate() {
            if indices.insert(field.name(), index).is_some() {
                return Err(MapperError::DuplicateField {
                    record: self.name,
                    field: field.name(),
                });
            }
            field
                .semantic_type()
                .validate()
                .map_err(|e| e.within_field(field.name()))?;
        }

        Ok(RecordDescriptor {
            name: self.name,
            ty_id: self.ty_id,
            fields: self.fields.into_boxed_slice(),
            indices,
        })
    }
}
