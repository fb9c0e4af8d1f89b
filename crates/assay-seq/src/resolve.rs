//! Structural discovery of sequence capabilities on a runtime type.

use assay_core::{ContractInfo, Member, MemberConventions, Method, Property, Shape, TypeInfo};

use crate::signature::{
    Capabilities, CapabilitySignature, ContractShape, DeclaringPath, Refinement,
};

/// Discovers capabilities using the default member conventions.
pub fn discover_capabilities(info: &TypeInfo) -> Capabilities {
    Resolver::default().discover(info)
}

/// Matches a type's members and contracts against the configured conventions.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    conventions: MemberConventions,
}

impl Resolver {
    /// Creates a resolver looking members up under `conventions`.
    pub fn new(conventions: MemberConventions) -> Self {
        Self { conventions }
    }

    /// Conventions in use.
    pub fn conventions(&self) -> &MemberConventions {
        &self.conventions
    }

    /// Produces the own-shape signature and one signature per sequence contract.
    pub fn discover(&self, info: &TypeInfo) -> Capabilities {
        let own_shape = self.own_shape(info);
        let contract_shapes: Vec<_> = info
            .contracts()
            .iter()
            .filter_map(|contract| self.contract_shape(info, contract))
            .collect();
        tracing::debug!(
            subject = info.name(),
            own_shape = own_shape.is_some(),
            contracts = contract_shapes.len(),
            "discovered sequence capabilities"
        );
        Capabilities {
            subject: info.name().to_string(),
            conventions: self.conventions.clone(),
            own_shape,
            contract_shapes,
        }
    }

    fn own_shape(&self, info: &TypeInfo) -> Option<CapabilitySignature> {
        let declares_any = info
            .members()
            .iter()
            .any(|member| self.conventions.is_iteration_member(member.name()));
        if !declares_any {
            return None;
        }
        let acquire = info.member(&self.conventions.acquire);
        Some(self.signature(DeclaringPath::Own(info.name().to_string()), acquire))
    }

    fn contract_shape(&self, info: &TypeInfo, contract: &ContractInfo) -> Option<ContractShape> {
        // Contracts without an acquire member anywhere in their chain are not sequences.
        let acquire = info.contract_member(contract, &self.conventions.acquire)?;
        let path = DeclaringPath::Contract(contract.name().to_string());
        // Found through the chain but not on the contract itself, so a listed base declares it.
        let inherits_iteration = contract.member(&self.conventions.acquire).is_none();
        Some(ContractShape {
            signature: self.signature(path, Some(acquire)),
            element: contract.element(),
            refinement: self.refinement(info, contract),
            inherits_iteration,
        })
    }

    fn signature(&self, path: DeclaringPath, acquire: Option<&Member>) -> CapabilitySignature {
        let acquire = acquire
            .and_then(Member::as_method)
            .filter(|method| is_acquire_shape(method))
            .cloned();
        let iterator = acquire
            .as_ref()
            .and_then(|method| method.returns().object_type());
        let Some(iterator) = iterator else {
            return CapabilitySignature {
                path,
                acquire,
                iterator: None,
                current: None,
                advance: None,
                release: None,
            };
        };
        CapabilitySignature {
            path,
            acquire,
            iterator: Some(iterator.name().to_string()),
            current: self.current(&iterator),
            advance: self.advance(&iterator),
            release: self.release(&iterator),
        }
    }

    fn current(&self, iterator: &TypeInfo) -> Option<Property> {
        iterator
            .member(&self.conventions.current)
            .and_then(Member::as_property)
            .filter(|property| property.ty().value_type().is_some())
            .cloned()
    }

    fn advance(&self, iterator: &TypeInfo) -> Option<Method> {
        iterator
            .member(&self.conventions.advance)
            .and_then(Member::as_method)
            .filter(|method| method.params().is_empty() && method.returns().is_value_of::<bool>())
            .cloned()
    }

    fn release(&self, iterator: &TypeInfo) -> Option<Method> {
        iterator
            .member(&self.conventions.release)
            .and_then(Member::as_method)
            .filter(|method| method.params().is_empty())
            .cloned()
    }

    fn refinement(&self, info: &TypeInfo, contract: &ContractInfo) -> Refinement {
        let positional = contract
            .member(&self.conventions.positional)
            .and_then(Member::as_method)
            .filter(|method| is_positional_shape(method))
            .cloned();
        let length = info
            .contract_member(contract, &self.conventions.length)
            .and_then(Member::as_property)
            .filter(|property| property.ty().is_value_of::<usize>())
            .cloned();
        let declares_length = contract.member(&self.conventions.length).is_some();

        match (positional, length) {
            (Some(positional), Some(length)) => Refinement::Positional { length, positional },
            (_, Some(length)) if declares_length => Refinement::Length { length },
            _ => Refinement::None,
        }
    }
}

fn is_acquire_shape(method: &Method) -> bool {
    method.params().is_empty()
        && !method.is_exclusive()
        && matches!(method.returns(), Shape::Object(_))
}

fn is_positional_shape(method: &Method) -> bool {
    matches!(method.params(), [index] if index.is::<usize>())
        && !method.is_exclusive()
        && method.returns().value_type().is_some()
}
