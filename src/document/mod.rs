pub mod lists;
pub mod model;
pub mod validate;

pub use lists::{DefaultList, ModelRef, ALL_DEFAULT_LISTS};
pub use model::{
    Capability, Configuration, Model, ProviderBinding, SchemaRevision, ALL_CAPABILITIES,
};
pub use validate::{validate_for_persistence, ValidationError};
