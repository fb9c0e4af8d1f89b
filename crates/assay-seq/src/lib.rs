#![deny(missing_docs)]
#![doc = "Structural sequence-capability discovery and multi-path equality assertions."]

pub mod adapter;
pub mod compare;
pub mod diagnostics;
pub mod resolve;
pub mod signature;
mod validate;

pub use adapter::{PositionalCursor, ScopedIterator, SequenceAdapter};
pub use compare::{assert_sequence_of, compare_sequences, compare_sequences_eq, SequenceComparator};
pub use diagnostics::PathLabel;
pub use resolve::{discover_capabilities, Resolver};
pub use signature::{
    Capabilities, CapabilityPath, CapabilitySignature, ContractShape, DeclaringPath, Refinement,
};
