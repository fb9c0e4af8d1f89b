#![deny(missing_docs)]
#![doc = "Shared error payloads, runtime introspection model and rendering helpers for assay."]

pub mod conventions;
pub mod errors;
pub mod friendly;
pub mod introspect;

pub use conventions::MemberConventions;
pub use errors::{AssertionError, Diagnostic, Divergence};
pub use friendly::{render_optional, render_sequence, NULL_TEXT};
pub use introspect::{
    ContractInfo, Member, MemberKind, Method, Object, Property, Reflect, Shape, TypeInfo,
    TypeThunk, ValueType,
};
