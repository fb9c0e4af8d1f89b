//! Uniform "next element or end" access over any capability path.

use std::any::Any;

use assay_core::{AssertionError, Method, Object, Property};

use crate::diagnostics::invocation_failed;
use crate::signature::{CapabilityPath, CapabilitySignature};

/// Iterator acquired through a signature. The iterator's release member runs
/// when the guard is dropped, on every exit path.
pub struct ScopedIterator<'a> {
    signature: &'a CapabilitySignature,
    cursor: Object,
}

impl<'a> ScopedIterator<'a> {
    /// Acquires a fresh iterator from `subject`.
    pub fn acquire(
        signature: &'a CapabilitySignature,
        subject: &dyn Any,
    ) -> Result<Self, AssertionError> {
        let owner = signature.path().name();
        let acquire = signature
            .acquire()
            .ok_or_else(|| invocation_failed(owner, "acquire"))?;
        let cursor = acquire
            .invoke(subject, Vec::new())
            .ok_or_else(|| invocation_failed(owner, "acquire"))?;
        Ok(Self { signature, cursor })
    }

    /// Advances and reads the element at the new position.
    pub fn next_element<A: Any>(&mut self) -> Result<Option<A>, AssertionError> {
        let iterator = self.signature.iterator_name().unwrap_or("iterator");
        let (Some(advance), Some(current)) = (self.signature.advance(), self.signature.current())
        else {
            return Err(invocation_failed(iterator, "advance"));
        };
        let available = advance
            .invoke_mut(&mut *self.cursor, Vec::new())
            .and_then(|result| result.downcast::<bool>().ok())
            .ok_or_else(|| invocation_failed(iterator, "advance"))?;
        if !*available {
            return Ok(None);
        }
        let element = current
            .get(&*self.cursor)
            .and_then(|value| value.downcast::<A>().ok())
            .ok_or_else(|| invocation_failed(iterator, "current"))?;
        Ok(Some(*element))
    }
}

impl Drop for ScopedIterator<'_> {
    fn drop(&mut self) {
        if let Some(release) = self.signature.release() {
            if release.invoke_mut(&mut *self.cursor, Vec::new()).is_none() {
                tracing::warn!(
                    path = %self.signature.path(),
                    "iterator release member refused its receiver"
                );
            }
        }
    }
}

/// Reads elements by position up to the length reported when opened.
pub struct PositionalCursor<'a> {
    subject: &'a dyn Any,
    positional: &'a Method,
    len: usize,
    index: usize,
}

impl<'a> PositionalCursor<'a> {
    /// Reads the implied length and positions the cursor before the first element.
    pub fn open(
        subject: &'a dyn Any,
        length: &'a Property,
        positional: &'a Method,
    ) -> Result<Self, AssertionError> {
        let len = read_length(length, subject)?;
        Ok(Self {
            subject,
            positional,
            len,
            index: 0,
        })
    }

    /// Length bounding valid positions.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether no position is valid.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads the element at the next position.
    pub fn next_element<A: Any>(&mut self) -> Result<Option<A>, AssertionError> {
        if self.index >= self.len {
            return Ok(None);
        }
        let element = self
            .positional
            .invoke(self.subject, vec![Box::new(self.index) as Object])
            .and_then(|value| value.downcast::<A>().ok())
            .ok_or_else(|| invocation_failed("positional access", "get"))?;
        // index < len, so this cannot overflow
        self.index += 1;
        Ok(Some(*element))
    }
}

/// Reads a count accessor on `subject`.
pub fn read_length(length: &Property, subject: &dyn Any) -> Result<usize, AssertionError> {
    length
        .get(subject)
        .and_then(|value| value.downcast::<usize>().ok())
        .map(|len| *len)
        .ok_or_else(|| invocation_failed("length", "len"))
}

/// Element source for one capability path.
pub enum SequenceAdapter<'a> {
    /// Acquire/advance/current iteration.
    Iteration(ScopedIterator<'a>),
    /// Positional reads.
    Positional(PositionalCursor<'a>),
}

impl<'a> SequenceAdapter<'a> {
    /// Opens the element source appropriate for `path`.
    ///
    /// Length contracts are opened through their iteration members; the count
    /// check itself is the comparator's job.
    pub fn open(path: CapabilityPath<'a>, subject: &'a dyn Any) -> Result<Self, AssertionError> {
        match path {
            CapabilityPath::PositionalContract {
                length, positional, ..
            } => Ok(SequenceAdapter::Positional(PositionalCursor::open(
                subject, length, positional,
            )?)),
            _ => Ok(SequenceAdapter::Iteration(ScopedIterator::acquire(
                path.signature(),
                subject,
            )?)),
        }
    }

    /// Produces the next element, or `None` at the end of the sequence.
    pub fn next_element<A: Any>(&mut self) -> Result<Option<A>, AssertionError> {
        match self {
            SequenceAdapter::Iteration(iterator) => iterator.next_element(),
            SequenceAdapter::Positional(cursor) => cursor.next_element(),
        }
    }

    /// Reads every remaining element.
    pub fn drain<A: Any>(mut self) -> Result<Vec<A>, AssertionError> {
        let mut items = Vec::new();
        while let Some(item) = self.next_element()? {
            items.push(item);
        }
        Ok(items)
    }
}
