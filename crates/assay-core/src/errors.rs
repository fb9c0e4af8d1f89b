//! Structured error types shared across assay crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`AssertionError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message. This text is reproduced verbatim by `Display`.
    pub message: String,
    /// Contextual key value pairs (type names, indices, path identities).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Creates a new payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Renders the message followed by code, context and hint.
    pub fn detailed(&self) -> String {
        let mut out = format!("{} (code: {})", self.message, self.code);
        if !self.context.is_empty() {
            out.push_str(" | context: [");
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                out.push_str(key);
                out.push('=');
                out.push_str(value);
            }
            out.push(']');
        }
        if let Some(hint) = &self.hint {
            out.push_str(" | hint: ");
            out.push_str(hint);
        }
        out
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Point at which an actual sequence stopped agreeing with the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Divergence {
    /// The actual sequence ended while the expected one still had items.
    ActualExhausted,
    /// The expected sequence ended while the actual one still had items.
    ExpectedExhausted,
    /// Both sequences had an item at `index` but the items were not equal.
    ValueDiffers {
        /// Zero based position of the first unequal pair.
        index: usize,
    },
}

impl Divergence {
    /// Short stable label used in diagnostic context.
    pub fn label(&self) -> &'static str {
        match self {
            Divergence::ActualExhausted => "exhausted-early",
            Divergence::ExpectedExhausted => "exhausted-late",
            Divergence::ValueDiffers { .. } => "value-differs",
        }
    }
}

/// Canonical error type raised by assay assertions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", content = "detail")]
pub enum AssertionError {
    /// The subject exposes no valid acquire-iterator member.
    #[error("{0}")]
    MissingIterationEntryPoint(Diagnostic),
    /// The iterator type exposes no valid current-value accessor.
    #[error("{0}")]
    MissingCurrentAccessor(Diagnostic),
    /// The iterator type exposes no valid advance operation.
    #[error("{0}")]
    MissingAdvanceOperation(Diagnostic),
    /// The discovered element type is not assignable to the requested one.
    #[error("{0}")]
    ElementTypeMismatch(Diagnostic),
    /// Exactly one of actual and expected was absent.
    #[error("{0}")]
    NullMismatch(Diagnostic),
    /// A length-capable path reported a count different from the expected one.
    #[error("{0}")]
    LengthMismatch(Diagnostic),
    /// A path produced an element sequence different from the expected one.
    #[error("{info}")]
    ElementMismatch {
        /// Where the sequences stopped agreeing.
        divergence: Divergence,
        /// Rendered payload.
        info: Diagnostic,
    },
    /// The running comparison index could not be advanced without overflow.
    #[error("{0}")]
    IndexOverflow(Diagnostic),
    /// An introspected member refused its receiver or returned an undeclared type.
    #[error("{0}")]
    Invocation(Diagnostic),
    /// Configuration documents that could not be parsed.
    #[error("{0}")]
    Config(Diagnostic),
}

impl AssertionError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &Diagnostic {
        match self {
            AssertionError::MissingIterationEntryPoint(info)
            | AssertionError::MissingCurrentAccessor(info)
            | AssertionError::MissingAdvanceOperation(info)
            | AssertionError::ElementTypeMismatch(info)
            | AssertionError::NullMismatch(info)
            | AssertionError::LengthMismatch(info)
            | AssertionError::IndexOverflow(info)
            | AssertionError::Invocation(info)
            | AssertionError::Config(info) => info,
            AssertionError::ElementMismatch { info, .. } => info,
        }
    }

    /// Returns the stable machine readable code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Returns whether the error reports a malformed capability rather than unequal values.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AssertionError::MissingIterationEntryPoint(_)
                | AssertionError::MissingCurrentAccessor(_)
                | AssertionError::MissingAdvanceOperation(_)
                | AssertionError::ElementTypeMismatch(_)
        )
    }

    /// Returns the divergence carried by an element mismatch.
    pub fn divergence(&self) -> Option<Divergence> {
        match self {
            AssertionError::ElementMismatch { divergence, .. } => Some(*divergence),
            _ => None,
        }
    }
}
