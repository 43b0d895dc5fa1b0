use crate::MapperError;
use crate::info::{RecordDescriptor, RecordType};
use crate::value::{DynamicRecord, FieldValue, ValueRef};

// -----------------------------------------------------------------------------
// DynRecord

/// Object-safe field access of a [`Record`] instance.
///
/// This is what the serializer walks; it has no knowledge of the concrete
/// type beyond [`record_type`](Self::record_type).
pub trait DynRecord: 'static {
    /// The identity of the concrete record type.
    fn record_type(&self) -> RecordType;

    /// Returns a view of the field with the given JSON key.
    ///
    /// Inherited fields are reachable by their own key.
    fn field(&self, name: &str) -> Option<ValueRef<'_>>;
}

// -----------------------------------------------------------------------------
// Record

/// A mapped record type.
///
/// Implemented with `#[derive(Record)]`; see the [crate docs](crate) for
/// the supported field types and attributes.
///
/// Manual implementations must keep three things consistent:
/// [`describe`](Self::describe) lists every field, [`DynRecord::field`]
/// returns a view for each of them, and [`from_record`](Self::from_record)
/// consumes them.
pub trait Record: FieldValue + DynRecord {
    /// Record name, used as the schema title.
    const NAME: &'static str;

    /// Builds the descriptor. Called once per type by the
    /// [`Resolver`](crate::Resolver); use [`descriptor`](Self::descriptor).
    fn describe() -> Result<RecordDescriptor, MapperError>;

    /// Returns the cached descriptor.
    #[inline]
    fn descriptor() -> Result<&'static RecordDescriptor, MapperError> {
        crate::resolve::<Self>()
    }

    /// Constructs the instance from deserialized fields.
    ///
    /// Fields are removed from `record` as they are consumed; absent fields
    /// take their declared default.
    fn from_record(record: &mut DynamicRecord) -> Result<Self, MapperError>;
}

// -----------------------------------------------------------------------------
// Enumeration

/// A closed set of symbolic values, mapped by member name.
///
/// Implemented with `#[derive(Enumeration)]` on an enum with unit variants.
///
/// ```
/// use jsondto_mapper::{Enumeration, derive::Enumeration};
///
/// #[derive(Enumeration, Debug, PartialEq)]
/// enum Level {
///     Low,
///     #[dto(rename = "HIGH")]
///     High,
/// }
///
/// assert_eq!(Level::MEMBERS, ["Low", "HIGH"]);
/// assert_eq!(Level::High.member_name(), "HIGH");
/// assert_eq!(Level::from_member_name("Low"), Some(Level::Low));
/// assert_eq!(Level::from_member_name("High"), None);
/// ```
pub trait Enumeration: 'static {
    const NAME: &'static str;

    /// Member names in declaration order.
    const MEMBERS: &'static [&'static str];

    fn member_name(&self) -> &'static str;

    fn from_member_name(name: &str) -> Option<Self>
    where
        Self: Sized;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    use serde_json::json;

    use crate::derive::{Enumeration, Record};
    use crate::info::{PrimitiveKind, SemanticType};
    use crate::value::{DynamicRecord, DynamicValue, FieldValue, ValueRef};
    use crate::{DynRecord, Enumeration as _, MapperError, Record as _};

    #[derive(Record, Debug, PartialEq)]
    struct Base {
        id: u64,
    }

    #[derive(Record, Debug, PartialEq)]
    #[dto(rename = "Article")]
    struct Derived {
        #[dto(flatten)]
        base: Base,
        #[dto(rename = "headline")]
        title: String,
        r#type: Kind,
        #[dto(default)]
        tags: Vec<String>,
        #[dto(default = 3)]
        revision: u32,
    }

    #[derive(Enumeration, Debug, PartialEq)]
    enum Kind {
        News,
        #[dto(rename = "op-ed")]
        Opinion,
    }

    #[derive(Record, Debug, PartialEq)]
    struct Page<T> {
        items: Vec<T>,
        next: Option<u32>,
    }

    #[test]
    fn derived_descriptor() {
        assert_eq!(Derived::NAME, "Article");

        let info = Derived::descriptor().unwrap();
        let names: Vec<_> = info.iter().map(|f| f.name()).collect();
        assert_eq!(names, ["id", "headline", "type", "tags", "revision"]);

        let required: Vec<_> = info.required().collect();
        assert_eq!(required, ["id", "headline", "type"]);

        assert_eq!(
            info.field("id").unwrap().semantic_type(),
            &SemanticType::Primitive(PrimitiveKind::Integer)
        );
    }

    #[test]
    fn field_access() {
        let article = Derived {
            base: Base { id: 9 },
            title: "Hello".to_string(),
            r#type: Kind::Opinion,
            tags: vec![],
            revision: 1,
        };

        assert!(matches!(article.field("id"), Some(ValueRef::UInt(9))));
        assert!(matches!(article.field("headline"), Some(ValueRef::Str("Hello"))));
        assert!(matches!(article.field("type"), Some(ValueRef::Member("op-ed"))));
        assert!(article.field("title").is_none());
        assert!(article.field("base").is_none());
    }

    #[test]
    fn construct_with_defaults() {
        let mut fields = DynamicRecord::new("Article");
        fields.insert("id", DynamicValue::UInt(4));
        fields.insert("headline", DynamicValue::String("Hi".to_string()));
        fields.insert("type", DynamicValue::Member("News"));

        let article = Derived::from_record(&mut fields).unwrap();
        assert_eq!(article.base, Base { id: 4 });
        assert_eq!(article.r#type, Kind::News);
        assert!(article.tags.is_empty());
        assert_eq!(article.revision, 3);
        assert!(fields.is_empty());

        let mut fields = DynamicRecord::new("Article");
        fields.insert("id", DynamicValue::UInt(4));
        fields.insert("type", DynamicValue::Member("News"));
        assert_eq!(
            Derived::from_record(&mut fields),
            Err(MapperError::MissingField {
                record: "Article",
                field: "headline",
            })
        );
    }

    #[test]
    fn record_from_other_kind() {
        let err = Base::from_dynamic(DynamicValue::Int(1)).unwrap_err();
        assert!(matches!(
            err,
            MapperError::InvalidValue { ref expected, ref found, .. }
                if expected == "record `Base`" && found == "integer"
        ));
    }

    #[test]
    fn enumeration_members() {
        assert_eq!(Kind::NAME, "Kind");
        assert_eq!(Kind::MEMBERS, ["News", "op-ed"]);
        assert_eq!(Kind::Opinion.member_name(), "op-ed");

        assert_eq!(
            Kind::from_dynamic(DynamicValue::String("op-ed".to_string())),
            Ok(Kind::Opinion)
        );
        assert!(matches!(
            Kind::from_dynamic(DynamicValue::Member("Opinion")),
            Err(MapperError::UnknownMember { enumeration: "Kind", .. })
        ));
        assert!(matches!(
            Kind::from_dynamic(DynamicValue::Bool(true)),
            Err(MapperError::InvalidValue { .. })
        ));
    }

    #[test]
    fn generic_record() {
        let page = Page {
            items: vec![1_i32, 2],
            next: None,
        };
        assert_eq!(
            crate::serialize(&page).unwrap(),
            json!({ "items": [1, 2] })
        );

        let words: Page<String> = crate::deserialize(&json!({
            "items": ["a", 2],
            "next": 5,
        }))
        .unwrap();
        assert_eq!(words.items, ["a", "2"]);
        assert_eq!(words.next, Some(5));

        let ints = Page::<i32>::descriptor().unwrap();
        let strings = Page::<String>::descriptor().unwrap();
        assert_ne!(ints.ty_id(), strings.ty_id());
        assert_eq!(
            ints.field("items").unwrap().semantic_type().to_string(),
            "list of integer"
        );
    }
}
