//! Multi-path sequence equality.

use std::any::Any;
use std::fmt::Debug;

use assay_core::{
    render_sequence, AssertionError, Divergence, MemberConventions, Reflect, ValueType,
};

use crate::adapter::{read_length, SequenceAdapter};
use crate::diagnostics::{self, PathLabel};
use crate::resolve::Resolver;
use crate::signature::{Capabilities, CapabilityPath};

/// Compares with the default conventions and a caller supplied element predicate.
pub fn compare_sequences<S, A, I, F>(
    actual: Option<&S>,
    expected: Option<I>,
    element_equal: F,
) -> Result<(), AssertionError>
where
    S: Reflect,
    A: Any + Debug,
    I: IntoIterator + Clone,
    I::Item: Debug,
    F: Fn(&A, &I::Item) -> bool,
{
    SequenceComparator::default().compare(actual, expected, element_equal)
}

/// Compares with the default conventions using `PartialEq` between elements.
pub fn compare_sequences_eq<A, S, I>(
    actual: Option<&S>,
    expected: Option<I>,
) -> Result<(), AssertionError>
where
    S: Reflect,
    A: Any + Debug + PartialEq<I::Item>,
    I: IntoIterator + Clone,
    I::Item: Debug,
{
    compare_sequences::<S, A, I, _>(actual, expected, |actual: &A, expected: &I::Item| {
        actual == expected
    })
}

/// Discovers and validates `actual` as a sequence of `A` without reading elements.
pub fn assert_sequence_of<A: Any, S: Reflect>(actual: &S) -> Result<Capabilities, AssertionError> {
    SequenceComparator::default().assert_sequence_of::<A, S>(actual)
}

/// Compares an actual value against an expected sequence along every path it exposes.
#[derive(Debug, Clone, Default)]
pub struct SequenceComparator {
    resolver: Resolver,
}

impl SequenceComparator {
    /// Creates a comparator matching members under `conventions`.
    pub fn new(conventions: MemberConventions) -> Self {
        Self {
            resolver: Resolver::new(conventions),
        }
    }

    /// Resolver used for discovery.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Discovers and validates `actual` as a sequence of `A`.
    pub fn assert_sequence_of<A: Any, S: Reflect>(
        &self,
        actual: &S,
    ) -> Result<Capabilities, AssertionError> {
        let capabilities = self.resolver.discover(&actual.type_info());
        capabilities.validate(ValueType::of::<A>())?;
        Ok(capabilities)
    }

    /// Succeeds only when every discovered path agrees with `expected`.
    ///
    /// The own shape is compared first, then each contract in discovery
    /// order. A length or positional contract declaring its own acquire
    /// member is also compared through that iteration once its refinement
    /// agrees. The first invalid signature or divergent path ends the call.
    pub fn compare<S, A, I, F>(
        &self,
        actual: Option<&S>,
        expected: Option<I>,
        element_equal: F,
    ) -> Result<(), AssertionError>
    where
        S: Reflect,
        A: Any + Debug,
        I: IntoIterator + Clone,
        I::Item: Debug,
        F: Fn(&A, &I::Item) -> bool,
    {
        let (actual, expected) = match (actual, expected) {
            (None, None) => return Ok(()),
            (None, Some(expected)) => {
                return Err(diagnostics::actual_absent(&render_sequence(expected)))
            }
            (Some(actual), None) => {
                let capabilities = self.resolver.discover(&actual.type_info());
                let rendered = render_subject::<A>(&capabilities, actual);
                return Err(diagnostics::expected_absent(&rendered));
            }
            (Some(actual), Some(expected)) => (actual, expected),
        };

        let capabilities = self.assert_sequence_of::<A, S>(actual)?;
        let subject: &dyn Any = actual;
        for path in capabilities.paths() {
            let iteration = path.declared_iteration();
            for path in std::iter::once(path).chain(iteration) {
                self.compare_path::<A, I, F>(
                    &capabilities,
                    path,
                    subject,
                    expected.clone(),
                    &element_equal,
                )?;
            }
        }
        Ok(())
    }

    fn compare_path<A, I, F>(
        &self,
        capabilities: &Capabilities,
        path: CapabilityPath<'_>,
        subject: &dyn Any,
        expected: I,
        element_equal: &F,
    ) -> Result<(), AssertionError>
    where
        A: Any + Debug,
        I: IntoIterator + Clone,
        I::Item: Debug,
        F: Fn(&A, &I::Item) -> bool,
    {
        tracing::trace!(
            path = %path.signature().path(),
            strategy = path.strategy(),
            "comparing capability path"
        );

        if let CapabilityPath::LengthContract { length, .. } = path {
            let reported = read_length(length, subject)?;
            let expected_count = expected.into_iter().count();
            if reported != expected_count {
                tracing::debug!(
                    path = %path.signature().path(),
                    expected_count,
                    reported,
                    "length mismatch"
                );
                let rendered = render_path::<A>(capabilities, path, subject);
                return Err(diagnostics::length_mismatch(&rendered, expected_count, reported));
            }
            return Ok(());
        }

        let label = PathLabel::for_path(path, self.resolver.conventions());
        let adapter = SequenceAdapter::open(path, subject)?;
        let divergence = lockstep::<A, I, F>(adapter, expected.clone(), element_equal, &label)?;
        let Some(divergence) = divergence else {
            return Ok(());
        };
        tracing::debug!(path = %label, divergence = divergence.label(), "sequence divergence");
        let rendered = render_path::<A>(capabilities, path, subject);
        Err(diagnostics::element_mismatch(
            &rendered,
            &render_sequence(expected),
            divergence,
            &label,
        ))
    }
}

/// Advances actual and expected together until they disagree or both end.
fn lockstep<A, I, F>(
    mut actual: SequenceAdapter<'_>,
    expected: I,
    element_equal: &F,
    label: &PathLabel,
) -> Result<Option<Divergence>, AssertionError>
where
    A: Any,
    I: IntoIterator,
    F: Fn(&A, &I::Item) -> bool,
{
    let mut expected = expected.into_iter();
    let mut index: usize = 0;
    loop {
        let actual_item = actual.next_element::<A>()?;
        let expected_item = expected.next();
        match (actual_item, expected_item) {
            (None, None) => return Ok(None),
            (None, Some(_)) => return Ok(Some(Divergence::ActualExhausted)),
            (Some(_), None) => return Ok(Some(Divergence::ExpectedExhausted)),
            (Some(actual_item), Some(expected_item)) => {
                if !element_equal(&actual_item, &expected_item) {
                    return Ok(Some(Divergence::ValueDiffers { index }));
                }
            }
        }
        index = index
            .checked_add(1)
            .ok_or_else(|| diagnostics::index_overflow(label))?;
    }
}

fn drain_path<A: Any>(
    path: CapabilityPath<'_>,
    subject: &dyn Any,
) -> Result<Vec<A>, AssertionError> {
    SequenceAdapter::open(path, subject)?.drain()
}

/// Renders `subject` through `path`, falling back to any other usable path.
fn render_path<A: Any + Debug>(
    capabilities: &Capabilities,
    path: CapabilityPath<'_>,
    subject: &dyn Any,
) -> String {
    match drain_path::<A>(path, subject) {
        Ok(items) => render_sequence(items),
        Err(_) => render_subject::<A>(capabilities, subject),
    }
}

/// Renders `subject` through the first path that yields elements, else by type name.
fn render_subject<A: Any + Debug>(capabilities: &Capabilities, subject: &dyn Any) -> String {
    capabilities
        .paths()
        .find_map(|path| drain_path::<A>(path, subject).ok())
        .map(render_sequence)
        .unwrap_or_else(|| capabilities.subject().to_string())
}
