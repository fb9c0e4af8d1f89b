//! Failure messages for capability validation and sequence comparison.

use std::fmt::{self, Display};

use assay_core::{AssertionError, Diagnostic, Divergence, MemberConventions, ValueType, NULL_TEXT};

use crate::signature::CapabilityPath;

/// Path identity as it appears in equality messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathLabel {
    /// Iteration through the acquire member of the named type or contract.
    Iteration {
        /// Owning type or contract.
        declaring: String,
        /// Acquire member name.
        acquire: String,
    },
    /// Positional reads.
    Indexer,
}

impl PathLabel {
    /// Label under which divergences on `path` are reported.
    pub fn for_path(path: CapabilityPath<'_>, conventions: &MemberConventions) -> Self {
        match path {
            CapabilityPath::PositionalContract { .. } => PathLabel::Indexer,
            _ => PathLabel::Iteration {
                declaring: path.signature().path().name().to_string(),
                acquire: conventions.acquire.clone(),
            },
        }
    }
}

impl Display for PathLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathLabel::Iteration { declaring, acquire } => write!(f, "'{declaring}.{acquire}()'"),
            PathLabel::Indexer => f.write_str("the indexer"),
        }
    }
}

pub(crate) fn missing_iteration_entry_point(subject: &str, acquire: &str) -> AssertionError {
    AssertionError::MissingIterationEntryPoint(
        Diagnostic::new(
            "missing-iteration-entry-point",
            format!(
                "Expected '{subject}' to be a sequence but it's missing a valid '{acquire}' method.",
            ),
        )
        .with_context("subject", subject)
        .with_context("member", acquire),
    )
}

pub(crate) fn missing_current_accessor(iterator: &str, current: &str) -> AssertionError {
    AssertionError::MissingCurrentAccessor(
        Diagnostic::new(
            "missing-current-accessor",
            format!(
                "Expected '{iterator}' to be an iterator but it's missing a valid '{current}' property.",
            ),
        )
        .with_context("iterator", iterator)
        .with_context("member", current),
    )
}

pub(crate) fn missing_advance_operation(iterator: &str, advance: &str) -> AssertionError {
    AssertionError::MissingAdvanceOperation(
        Diagnostic::new(
            "missing-advance-operation",
            format!(
                "Expected '{iterator}' to be an iterator but it's missing a valid '{advance}' method.",
            ),
        )
        .with_context("iterator", iterator)
        .with_context("member", advance),
    )
}

pub(crate) fn element_type_mismatch(
    subject: &str,
    requested: ValueType,
    discovered: ValueType,
) -> AssertionError {
    AssertionError::ElementTypeMismatch(
        Diagnostic::new(
            "element-type-mismatch",
            format!(
                "Expected '{subject}' to be a sequence of '{requested}' but found a sequence of '{discovered}'."
            ),
        )
        .with_context("subject", subject)
        .with_context("requested", requested.name())
        .with_context("discovered", discovered.name()),
    )
}

pub(crate) fn actual_absent(expected: &str) -> AssertionError {
    AssertionError::NullMismatch(
        Diagnostic::new(
            "null-mismatch",
            format!("Expected '{expected}' but found '{NULL_TEXT}'."),
        )
        .with_context("absent", "actual"),
    )
}

pub(crate) fn expected_absent(actual: &str) -> AssertionError {
    AssertionError::NullMismatch(
        Diagnostic::new(
            "null-mismatch",
            format!("Expected '{NULL_TEXT}' but found '{actual}'."),
        )
        .with_context("absent", "expected"),
    )
}

pub(crate) fn length_mismatch(
    actual: &str,
    expected_count: usize,
    reported: usize,
) -> AssertionError {
    AssertionError::LengthMismatch(
        Diagnostic::new(
            "length-mismatch",
            format!(
                "Expected '{actual}' to have count value of {expected_count} but found {reported}.",
            ),
        )
        .with_context("expected_count", expected_count.to_string())
        .with_context("reported_count", reported.to_string()),
    )
}

pub(crate) fn element_mismatch(
    actual: &str,
    expected: &str,
    divergence: Divergence,
    path: &PathLabel,
) -> AssertionError {
    let detail = match divergence {
        Divergence::ActualExhausted => "it has less items".to_string(),
        Divergence::ExpectedExhausted => "it has more items".to_string(),
        Divergence::ValueDiffers { index } => format!("it differs at index {index}"),
    };
    let mut info = Diagnostic::new(
        "element-mismatch",
        format!("Expected '{actual}' to be equal to '{expected}' but {detail} when using {path}."),
    )
    .with_context("divergence", divergence.label())
    .with_context("path", path.to_string());
    if let Divergence::ValueDiffers { index } = divergence {
        info = info.with_context("index", index.to_string());
    }
    AssertionError::ElementMismatch { divergence, info }
}

pub(crate) fn index_overflow(path: &PathLabel) -> AssertionError {
    AssertionError::IndexOverflow(
        Diagnostic::new(
            "index-overflow",
            format!("Index overflowed while comparing sequences when using {path}."),
        )
        .with_context("path", path.to_string())
        .with_hint("compare a shorter prefix of the sequence"),
    )
}

pub(crate) fn invocation_failed(owner: &str, member: &str) -> AssertionError {
    AssertionError::Invocation(
        Diagnostic::new(
            "invocation-failed",
            format!(
                "Member '{member}' of '{owner}' could not be invoked or returned an undeclared type.",
            ),
        )
        .with_context("owner", owner)
        .with_context("member", member),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_and_divergence_messages_name_the_path() {
        let label = PathLabel::Iteration {
            declaring: "Sequence<i32>".to_string(),
            acquire: "iter".to_string(),
        };
        assert_eq!(
            index_overflow(&label).to_string(),
            "Index overflowed while comparing sequences when using 'Sequence<i32>.iter()'."
        );
        assert_eq!(
            element_mismatch(
                "0, 1",
                "0, 2",
                Divergence::ValueDiffers { index: 1 },
                &PathLabel::Indexer,
            )
            .to_string(),
            "Expected '0, 1' to be equal to '0, 2' but it differs at index 1 when using the indexer."
        );
    }
}
