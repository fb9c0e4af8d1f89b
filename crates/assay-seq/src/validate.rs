//! Fail-fast validation of discovered capability signatures.

use assay_core::{AssertionError, ValueType};

use crate::diagnostics;
use crate::signature::{Capabilities, CapabilitySignature, Refinement};

impl Capabilities {
    /// Checks every discovered path before any element is read.
    ///
    /// The own shape and each plain contract must carry all three iteration
    /// members; every path's element type must be assignable to `requested`.
    /// Length and positional refinements that inherit their iteration from a
    /// listed base contract rely on that base being validated on its own; a
    /// refinement declaring its own acquire member is validated here.
    pub fn validate(&self, requested: ValueType) -> Result<(), AssertionError> {
        if !self.is_sequence() {
            return Err(diagnostics::missing_iteration_entry_point(
                &self.subject,
                &self.conventions.acquire,
            ));
        }

        if let Some(own) = &self.own_shape {
            self.validate_signature(own)?;
            if let Some(element) = own.element() {
                self.check_element(requested, element)?;
            }
        }

        for shape in &self.contract_shapes {
            match &shape.refinement {
                Refinement::None => self.validate_signature(&shape.signature)?,
                Refinement::Length { .. } => {}
                Refinement::Positional { positional, .. } => {
                    if let Some(element) = positional.returns().value_type() {
                        self.check_element(requested, element)?;
                    }
                }
            }
            if shape.declares_refined_iteration() {
                self.validate_signature(&shape.signature)?;
            }
            self.check_element(requested, shape.element)?;
        }
        Ok(())
    }

    fn validate_signature(&self, signature: &CapabilitySignature) -> Result<(), AssertionError> {
        if signature.acquire.is_none() {
            return Err(diagnostics::missing_iteration_entry_point(
                &self.subject,
                &self.conventions.acquire,
            ));
        }
        let iterator = signature.iterator_name().unwrap_or(&self.subject);
        if signature.current.is_none() {
            return Err(diagnostics::missing_current_accessor(
                iterator,
                &self.conventions.current,
            ));
        }
        if signature.advance.is_none() {
            return Err(diagnostics::missing_advance_operation(
                iterator,
                &self.conventions.advance,
            ));
        }
        Ok(())
    }

    fn check_element(
        &self,
        requested: ValueType,
        discovered: ValueType,
    ) -> Result<(), AssertionError> {
        if requested.is_assignable_from(&discovered) {
            Ok(())
        } else {
            Err(diagnostics::element_type_mismatch(
                &self.subject,
                requested,
                discovered,
            ))
        }
    }
}
