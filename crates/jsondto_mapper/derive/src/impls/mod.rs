// -----------------------------------------------------------------------------
// Modules

mod enumeration;
mod record;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use enumeration::impl_enumeration;
pub(crate) use record::impl_record;
