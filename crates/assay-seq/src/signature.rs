//! Capability signatures: the structural shapes discovered for each path.

use std::fmt::{self, Display};

use assay_core::{MemberConventions, Method, Property, ValueType};

/// Identity of the type or contract that owns a capability shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaringPath {
    /// Members declared directly by the subject type.
    Own(String),
    /// Members implemented for a separately named contract.
    Contract(String),
}

impl DeclaringPath {
    /// Name of the owning type or contract.
    pub fn name(&self) -> &str {
        match self {
            DeclaringPath::Own(name) | DeclaringPath::Contract(name) => name,
        }
    }

    /// Returns whether the path is the subject's own shape.
    pub fn is_own_shape(&self) -> bool {
        matches!(self, DeclaringPath::Own(_))
    }

    /// Returns whether the path comes from a named contract.
    pub fn is_contract_shape(&self) -> bool {
        matches!(self, DeclaringPath::Contract(_))
    }
}

impl Display for DeclaringPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Acquire/current/advance members discovered for one path.
///
/// Each reference is `None` when the member is absent or does not have the
/// required shape.
#[derive(Debug, Clone)]
pub struct CapabilitySignature {
    pub(crate) path: DeclaringPath,
    pub(crate) acquire: Option<Method>,
    pub(crate) iterator: Option<String>,
    pub(crate) current: Option<Property>,
    pub(crate) advance: Option<Method>,
    pub(crate) release: Option<Method>,
}

impl CapabilitySignature {
    /// Owner of the shape.
    pub fn path(&self) -> &DeclaringPath {
        &self.path
    }

    /// Operation returning a fresh iterator object.
    pub fn acquire(&self) -> Option<&Method> {
        self.acquire.as_ref()
    }

    /// Name of the iterator type returned by the acquire operation.
    pub fn iterator_name(&self) -> Option<&str> {
        self.iterator.as_deref()
    }

    /// Accessor for the element at the iterator's current position.
    pub fn current(&self) -> Option<&Property> {
        self.current.as_ref()
    }

    /// Operation moving the iterator forward.
    pub fn advance(&self) -> Option<&Method> {
        self.advance.as_ref()
    }

    /// Optional teardown operation of the iterator.
    pub fn release(&self) -> Option<&Method> {
        self.release.as_ref()
    }

    /// Element type exposed by the current-value accessor.
    pub fn element(&self) -> Option<ValueType> {
        self.current.as_ref().and_then(|current| current.ty().value_type())
    }

    /// Returns whether all three iteration members are present and well formed.
    pub fn is_well_formed(&self) -> bool {
        self.acquire.is_some() && self.current.is_some() && self.advance.is_some()
    }

    /// Returns whether the signature is the subject's own shape.
    pub fn is_own_shape(&self) -> bool {
        self.path.is_own_shape()
    }

    /// Returns whether the signature comes from a named contract.
    pub fn is_contract_shape(&self) -> bool {
        self.path.is_contract_shape()
    }
}

/// Optional capability layered on top of a contract's iteration.
///
/// A contract that directly declares both a length and a positional accessor
/// is classified as `Positional`, since positional comparison also bounds the
/// element count.
#[derive(Debug, Clone)]
pub enum Refinement {
    /// Plain sequence contract.
    None,
    /// The contract reports its element count without iterating.
    Length {
        /// Count accessor.
        length: Property,
    },
    /// The contract reads elements by position, bounded by its implied length.
    Positional {
        /// Count accessor bounding valid positions.
        length: Property,
        /// Element-at-position operation.
        positional: Method,
    },
}

/// One named sequence contract satisfied by the subject.
#[derive(Debug, Clone)]
pub struct ContractShape {
    pub(crate) signature: CapabilitySignature,
    pub(crate) element: ValueType,
    pub(crate) refinement: Refinement,
    pub(crate) inherits_iteration: bool,
}

impl ContractShape {
    /// Iteration members of the contract.
    pub fn signature(&self) -> &CapabilitySignature {
        &self.signature
    }

    /// Element type asserted by the contract.
    pub fn element(&self) -> ValueType {
        self.element
    }

    /// Length or positional refinement carried by the contract.
    pub fn refinement(&self) -> &Refinement {
        &self.refinement
    }

    /// Returns whether the iteration members come from a base contract the
    /// subject also lists, rather than from this contract itself.
    pub fn inherits_iteration(&self) -> bool {
        self.inherits_iteration
    }

    /// Returns whether the contract's own iteration members must be checked
    /// alongside its refinement.
    pub fn declares_refined_iteration(&self) -> bool {
        !self.inherits_iteration && !matches!(self.refinement, Refinement::None)
    }

    /// Returns the comparison variant for this contract.
    pub fn path(&self) -> CapabilityPath<'_> {
        match &self.refinement {
            Refinement::None => CapabilityPath::PlainContract(&self.signature),
            Refinement::Length { length } => CapabilityPath::LengthContract {
                signature: &self.signature,
                length,
                inherits_iteration: self.inherits_iteration,
            },
            Refinement::Positional { length, positional } => {
                CapabilityPath::PositionalContract {
                    signature: &self.signature,
                    length,
                    positional,
                    inherits_iteration: self.inherits_iteration,
                }
            }
        }
    }
}

/// Flat set of comparison variants, one per discovered path.
#[derive(Debug, Clone, Copy)]
pub enum CapabilityPath<'a> {
    /// The subject's own members, compared by iteration.
    OwnShape(&'a CapabilitySignature),
    /// A plain contract, compared by iteration.
    PlainContract(&'a CapabilitySignature),
    /// A length-capable contract, compared by count.
    LengthContract {
        /// Iteration members of the contract.
        signature: &'a CapabilitySignature,
        /// Count accessor.
        length: &'a Property,
        /// Whether iteration is compared through a separately listed base contract.
        inherits_iteration: bool,
    },
    /// A positional-access contract, compared by positional reads.
    PositionalContract {
        /// Iteration members of the contract.
        signature: &'a CapabilitySignature,
        /// Count accessor bounding valid positions.
        length: &'a Property,
        /// Element-at-position operation.
        positional: &'a Method,
        /// Whether iteration is compared through a separately listed base contract.
        inherits_iteration: bool,
    },
}

impl<'a> CapabilityPath<'a> {
    /// Iteration members behind the path.
    pub fn signature(&self) -> &'a CapabilitySignature {
        match *self {
            CapabilityPath::OwnShape(signature)
            | CapabilityPath::PlainContract(signature)
            | CapabilityPath::LengthContract { signature, .. }
            | CapabilityPath::PositionalContract { signature, .. } => signature,
        }
    }

    /// Iteration of a refined contract that declares its own acquire member.
    ///
    /// No other path covers those members, so they are compared as a plain
    /// contract after the refinement check.
    pub fn declared_iteration(&self) -> Option<CapabilityPath<'a>> {
        match *self {
            CapabilityPath::LengthContract {
                signature,
                inherits_iteration: false,
                ..
            }
            | CapabilityPath::PositionalContract {
                signature,
                inherits_iteration: false,
                ..
            } => Some(CapabilityPath::PlainContract(signature)),
            _ => None,
        }
    }

    /// Name of the comparison strategy applied to the path.
    pub fn strategy(&self) -> &'static str {
        match self {
            CapabilityPath::OwnShape(_) | CapabilityPath::PlainContract(_) => "iteration",
            CapabilityPath::LengthContract { .. } => "length",
            CapabilityPath::PositionalContract { .. } => "positional",
        }
    }
}

/// Everything the resolver found on one subject type.
#[derive(Debug, Clone)]
pub struct Capabilities {
    pub(crate) subject: String,
    pub(crate) conventions: MemberConventions,
    pub(crate) own_shape: Option<CapabilitySignature>,
    pub(crate) contract_shapes: Vec<ContractShape>,
}

impl Capabilities {
    /// Name of the inspected type.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Member conventions used during discovery.
    pub fn conventions(&self) -> &MemberConventions {
        &self.conventions
    }

    /// Own-shape signature, present when the type declares any iteration member.
    pub fn own_shape(&self) -> Option<&CapabilitySignature> {
        self.own_shape.as_ref()
    }

    /// Contract-shape signatures in the order the type reports its contracts.
    pub fn contract_shapes(&self) -> &[ContractShape] {
        &self.contract_shapes
    }

    /// Returns whether the type exposes any sequence capability at all.
    pub fn is_sequence(&self) -> bool {
        self.own_shape.is_some() || !self.contract_shapes.is_empty()
    }

    /// All paths in comparison order: own shape first, then each contract.
    pub fn paths(&self) -> impl Iterator<Item = CapabilityPath<'_>> + '_ {
        self.own_shape
            .iter()
            .map(CapabilityPath::OwnShape)
            .chain(self.contract_shapes.iter().map(ContractShape::path))
    }
}
