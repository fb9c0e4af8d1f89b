mod common;

use assay_core::{Reflect, ValueType};
use assay_seq::{
    discover_capabilities, CapabilityPath, DeclaringPath, PathLabel, Refinement, Resolver,
};
use tracing_subscriber::EnvFilter;

use common::{Listing, RangeSequence};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn enumerable_exposes_only_its_own_shape() {
    init_tracing();
    let capabilities = discover_capabilities(&RangeSequence::enumerable(2).type_info());
    assert!(capabilities.is_sequence());
    let own = capabilities.own_shape().expect("own shape");
    assert_eq!(own.path(), &DeclaringPath::Own("RangeEnumerable".to_string()));
    assert_eq!(own.iterator_name(), Some("RangeCursor"));
    assert!(own.release().is_some());
    assert_eq!(own.element(), Some(ValueType::of::<i32>()));
    assert!(capabilities.contract_shapes().is_empty());
}

#[test]
fn contracts_are_classified_by_their_direct_members() {
    init_tracing();
    let capabilities = discover_capabilities(&RangeSequence::list(0, 0, 0, 0, 0).type_info());
    let shapes = capabilities.contract_shapes();
    let names: Vec<_> = shapes.iter().map(|shape| shape.signature().path().name()).collect();
    assert_eq!(names, ["Sequence", "Sequence<i32>", "Collection<i32>", "List<i32>"]);

    assert!(matches!(shapes[0].refinement(), Refinement::None));
    assert!(matches!(shapes[1].refinement(), Refinement::None));
    assert!(matches!(shapes[2].refinement(), Refinement::Length { .. }));
    assert!(matches!(shapes[3].refinement(), Refinement::Positional { .. }));
    assert!(!shapes[1].inherits_iteration());
    assert!(shapes[2].inherits_iteration() && shapes[3].inherits_iteration());
    assert!(shapes.iter().all(|shape| !shape.declares_refined_iteration()));

    // refined contracts iterate through the acquire member inherited from their base
    assert!(shapes.iter().all(|shape| shape.signature().is_well_formed()));
}

#[test]
fn paths_start_with_the_own_shape() {
    let subject = RangeSequence::list(0, 0, 0, 0, 0);
    let capabilities = discover_capabilities(&subject.type_info());
    let strategies: Vec<_> = capabilities.paths().map(|path| path.strategy()).collect();
    assert_eq!(
        strategies,
        ["iteration", "iteration", "iteration", "length", "positional"]
    );
    let first = capabilities.paths().next().expect("own path");
    assert!(matches!(first, CapabilityPath::OwnShape(_)));
}

#[test]
fn path_labels_name_the_declaring_type_or_the_indexer() {
    let resolver = Resolver::default();
    let capabilities = resolver.discover(&Listing::new(vec![1]).type_info());
    let labels: Vec<_> = capabilities
        .paths()
        .map(|path| PathLabel::for_path(path, resolver.conventions()).to_string())
        .collect();
    assert_eq!(
        labels,
        [
            "'Listing.iter()'",
            "'Sequence<i32>.iter()'",
            "'Collection<i32>.iter()'",
            "the indexer"
        ]
    );
}
