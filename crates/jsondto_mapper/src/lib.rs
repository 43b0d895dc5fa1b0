#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `::jsondto_mapper`, which must also resolve
// inside the crate itself (unit tests derive on local types).
extern crate self as jsondto_mapper;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod path;
mod record;
mod resolver;
mod utils;

pub mod de;
pub mod diagnostics;
pub mod info;
pub mod schema;
pub mod ser;
pub mod timestamp;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::MapperError;
pub use path::FieldPath;
pub use record::{DynRecord, Enumeration, Record};
pub use resolver::{Resolver, resolve};

pub use de::{DeserializeDriver, deserialize};
pub use schema::derive_schema;
pub use ser::serialize;

pub use jsondto_mapper_derive as derive;
