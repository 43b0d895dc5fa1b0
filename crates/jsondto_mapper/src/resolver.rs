use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::cell::RefCell;
use std::sync::{PoisonError, RwLock};

use crate::info::RecordDescriptor;
use crate::utils::TypeIdMap;
use crate::{MapperError, Record};

// -----------------------------------------------------------------------------
// Resolver

/// Process-lifetime cache of [`RecordDescriptor`]s, keyed by [`TypeId`].
///
/// A descriptor is built by [`Record::describe`] on first request, leaked,
/// and shared from then on. Failed builds are not cached.
///
/// Concurrent first requests may both build the descriptor; whichever is
/// inserted first is published and the other is dropped.
///
/// ```
/// use jsondto_mapper::{derive::Record, resolve};
///
/// #[derive(Record)]
/// struct Tag {
///     label: String,
/// }
///
/// let a = resolve::<Tag>().unwrap();
/// let b = resolve::<Tag>().unwrap();
/// assert!(core::ptr::eq(a, b));
/// ```
pub struct Resolver(RwLock<TypeIdMap<&'static RecordDescriptor>>);

static GLOBAL: Resolver = Resolver::new();

std::thread_local! {
    // Records whose `describe` is running on this thread.
    static IN_PROGRESS: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

impl Resolver {
    /// Create an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// The cache used by [`resolve`] and [`Record::descriptor`].
    #[inline]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Returns the cached descriptor of `T`, building it first if needed.
    ///
    /// A record that flattens itself (directly or through other records)
    /// fails with [`MapperError::RecursiveRecord`].
    #[inline(always)]
    pub fn resolve<T: Record>(&'static self) -> Result<&'static RecordDescriptor, MapperError> {
        self.get_or_insert_by_type_id(TypeId::of::<T>(), T::NAME, T::describe)
    }

    /// Whether a descriptor for `T` has been published.
    pub fn contains<T: Record>(&self) -> bool {
        self.get_by_type_id(TypeId::of::<T>()).is_some()
    }

    /// Number of published descriptors.
    pub fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &'static self,
        type_id: TypeId,
        name: &'static str,
        describe: fn() -> Result<RecordDescriptor, MapperError>,
    ) -> Result<&'static RecordDescriptor, MapperError> {
        if let Some(info) = self.get_by_type_id(type_id) {
            return Ok(info);
        }

        let info = {
            let _guard = InProgress::enter(type_id, name)?;
            describe()?
        };

        Ok(self.insert_by_type_id(type_id, info))
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static RecordDescriptor> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, info: RecordDescriptor) -> &'static RecordDescriptor {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || {
                log::debug!(
                    "published descriptor of record `{}` ({} fields)",
                    info.name(),
                    info.len()
                );
                Box::leak(Box::new(info))
            })
    }
}

/// Returns the cached descriptor of `T` from the global [`Resolver`].
#[inline]
pub fn resolve<T: Record>() -> Result<&'static RecordDescriptor, MapperError> {
    Resolver::global().resolve::<T>()
}

// -----------------------------------------------------------------------------
// InProgress

struct InProgress;

impl InProgress {
    fn enter(type_id: TypeId, name: &'static str) -> Result<Self, MapperError> {
        IN_PROGRESS.with_borrow_mut(|stack| {
            if stack.contains(&type_id) {
                return Err(MapperError::RecursiveRecord { record: name });
            }
            stack.push(type_id);
            Ok(Self)
        })
    }
}

impl Drop for InProgress {
    fn drop(&mut self) {
        IN_PROGRESS.with_borrow_mut(|stack| {
            stack.pop();
        });
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{Resolver, resolve};
    use crate::derive::Record;
    use crate::info::{RecordDescriptor, RecordType, SemanticType};
    use crate::value::{DynamicRecord, DynamicValue, FieldValue, ValueRef};
    use crate::{DynRecord, MapperError, Record};

    #[derive(Record)]
    struct Node {
        label: String,
        #[dto(default)]
        children: Vec<Node>,
    }

    // `describe` cannot be generated for a record flattening itself, so
    // this one is written by hand.
    struct Ouroboros;

    impl FieldValue for Ouroboros {
        fn semantic_type() -> SemanticType {
            SemanticType::Record(RecordType::of::<Self>())
        }

        fn as_value_ref(&self) -> ValueRef<'_> {
            ValueRef::Record(self)
        }

        fn from_dynamic(_: DynamicValue) -> Result<Self, MapperError> {
            Ok(Self)
        }
    }

    impl DynRecord for Ouroboros {
        fn record_type(&self) -> RecordType {
            RecordType::of::<Self>()
        }

        fn field(&self, _: &str) -> Option<ValueRef<'_>> {
            None
        }
    }

    impl Record for Ouroboros {
        const NAME: &'static str = "Ouroboros";

        fn describe() -> Result<RecordDescriptor, MapperError> {
            RecordDescriptor::builder::<Self>()
                .field::<i32>("depth", false)
                .flatten::<Self>()?
                .build()
        }

        fn from_record(_: &mut DynamicRecord) -> Result<Self, MapperError> {
            Ok(Self)
        }
    }

    #[test]
    fn cached_identity() {
        let first = resolve::<Node>().unwrap();
        assert!(Resolver::global().contains::<Node>());
        let second = Node::descriptor().unwrap();
        assert!(core::ptr::eq(first, second));
        assert!(Resolver::global().len() >= 1);
    }

    #[test]
    fn self_reference_through_list() {
        let info = resolve::<Node>().unwrap();
        let children = info.field("children").unwrap();
        let SemanticType::ListOf(element) = children.semantic_type() else {
            panic!("expected a list");
        };
        let SemanticType::Record(node) = element.as_ref() else {
            panic!("expected a record");
        };
        assert!(core::ptr::eq(node.descriptor().unwrap(), info));
    }

    #[test]
    fn self_flatten_fails_every_time() {
        for _ in 0..2 {
            assert_eq!(
                resolve::<Ouroboros>().unwrap_err(),
                MapperError::RecursiveRecord {
                    record: "Ouroboros"
                }
            );
        }
        assert!(!Resolver::global().contains::<Ouroboros>());
    }

    #[derive(Record)]
    struct Sensor {
        id: u32,
        readings: Vec<f64>,
    }

    #[test]
    fn concurrent_first_resolution() {
        static LOCAL: Resolver = Resolver::new();

        let published: Vec<&'static RecordDescriptor> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| LOCAL.resolve::<Sensor>().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(LOCAL.len(), 1);
        assert!(LOCAL.contains::<Sensor>());
        let first = published[0];
        assert!(published.iter().all(|info| core::ptr::eq(*info, first)));
        assert!(core::ptr::eq(LOCAL.resolve::<Sensor>().unwrap(), first));
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn local_resolver() {
        static LOCAL: Resolver = Resolver::new();
        assert_eq!(LOCAL.len(), 0);
        let info = LOCAL.resolve::<Node>().unwrap();
        assert_eq!(LOCAL.len(), 1);
        assert!(!core::ptr::eq(info, resolve::<Node>().unwrap()));
    }
}
