#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use assay_core::{ContractInfo, Member, Method, Property, Reflect, TypeInfo, ValueType};

/// Counts iterator acquisitions and releases across every path of a fixture.
#[derive(Debug, Default)]
pub struct Lifecycle {
    pub acquired: Cell<usize>,
    pub released: Cell<usize>,
}

pub struct RangeCursor {
    count: usize,
    position: Option<usize>,
    lifecycle: Rc<Lifecycle>,
}

pub fn range_cursor_type() -> TypeInfo {
    TypeInfo::new("RangeCursor")
        .with_member(Member::property(
            "current",
            Property::new(|cursor: &RangeCursor| cursor.position.unwrap_or_default() as i32),
        ))
        .with_member(Member::method(
            "move_next",
            Method::new_mut(|cursor: &mut RangeCursor| {
                let next = cursor.position.map_or(0, |position| position + 1);
                cursor.position = Some(next);
                next < cursor.count
            }),
        ))
        .with_member(Member::method(
            "release",
            Method::new_mut(|cursor: &mut RangeCursor| {
                let released = &cursor.lifecycle.released;
                released.set(released.get() + 1);
            }),
        ))
}

fn range_acquire(select: fn(&RangeSequence) -> usize) -> Member {
    Member::method(
        "iter",
        Method::new(move |range: &RangeSequence| {
            let acquired = &range.lifecycle.acquired;
            acquired.set(acquired.get() + 1);
            RangeCursor {
                count: select(range),
                position: None,
                lifecycle: Rc::clone(&range.lifecycle),
            }
        })
        .returning(range_cursor_type),
    )
}

/// Yields `0..n` through each path, with an independently chosen `n` per path.
pub struct RangeSequence {
    name: &'static str,
    own: usize,
    sequence: usize,
    typed: usize,
    len: Option<usize>,
    indexed: Option<usize>,
    lifecycle: Rc<Lifecycle>,
}

impl RangeSequence {
    /// Own shape only.
    pub fn enumerable(count: usize) -> Self {
        Self {
            name: "RangeEnumerable",
            own: count,
            sequence: 0,
            typed: 0,
            len: None,
            indexed: None,
            lifecycle: Rc::default(),
        }
    }

    /// Own shape, two plain contracts and a length contract.
    pub fn collection(own: usize, sequence: usize, typed: usize, len: usize) -> Self {
        Self {
            name: "RangeCollection",
            own,
            sequence,
            typed,
            len: Some(len),
            indexed: None,
            lifecycle: Rc::default(),
        }
    }

    /// Collection plus a positional-access contract.
    pub fn list(own: usize, sequence: usize, typed: usize, len: usize, indexed: usize) -> Self {
        Self {
            name: "RangeList",
            indexed: Some(indexed),
            ..Self::collection(own, sequence, typed, len)
        }
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }
}

impl Reflect for RangeSequence {
    fn type_info(&self) -> TypeInfo {
        let element = ValueType::of::<i32>();
        let mut info = TypeInfo::new(self.name).with_member(range_acquire(|range| range.own));
        if self.len.is_none() {
            return info;
        }

        info = info
            .with_contract(
                ContractInfo::new("Sequence", element)
                    .with_member(range_acquire(|range| range.sequence)),
            )
            .with_contract(
                ContractInfo::new("Sequence<i32>", element)
                    .refines("Sequence")
                    .with_member(range_acquire(|range| range.typed)),
            )
            .with_contract(
                ContractInfo::new("Collection<i32>", element)
                    .refines("Sequence<i32>")
                    .with_member(Member::property(
                        "len",
                        Property::new(|range: &RangeSequence| range.len.unwrap_or_default()),
                    )),
            );
        if self.indexed.is_some() {
            info = info.with_contract(
                ContractInfo::new("List<i32>", element)
                    .refines("Collection<i32>")
                    .with_member(Member::property(
                        "len",
                        Property::new(|range: &RangeSequence| range.indexed.unwrap_or_default()),
                    ))
                    .with_member(Member::method(
                        "get",
                        Method::with_arg(|_: &RangeSequence, index: usize| index as i32),
                    )),
            );
        }
        info
    }
}

pub struct ListingCursor {
    items: Rc<Vec<i32>>,
    position: Option<usize>,
}

fn listing_cursor_type() -> TypeInfo {
    TypeInfo::new("ListingCursor")
        .with_member(Member::property(
            "current",
            Property::new(|cursor: &ListingCursor| {
                cursor
                    .position
                    .and_then(|position| cursor.items.get(position).copied())
                    .unwrap_or_default()
            }),
        ))
        .with_member(Member::method(
            "move_next",
            Method::new_mut(|cursor: &mut ListingCursor| {
                let next = cursor.position.map_or(0, |position| position + 1);
                cursor.position = Some(next);
                next < cursor.items.len()
            }),
        ))
}

fn listing_acquire() -> Member {
    Member::method(
        "iter",
        Method::new(|listing: &Listing| ListingCursor {
            items: Rc::clone(&listing.items),
            position: None,
        })
        .returning(listing_cursor_type),
    )
}

/// Arbitrary `i32` values exposed consistently through every kind of path.
pub struct Listing {
    items: Rc<Vec<i32>>,
}

impl Listing {
    pub fn new(items: Vec<i32>) -> Self {
        Self {
            items: Rc::new(items),
        }
    }
}

impl Reflect for Listing {
    fn type_info(&self) -> TypeInfo {
        let element = ValueType::of::<i32>();
        TypeInfo::new("Listing")
            .with_member(listing_acquire())
            .with_contract(
                ContractInfo::new("Sequence<i32>", element).with_member(listing_acquire()),
            )
            .with_contract(
                ContractInfo::new("Collection<i32>", element)
                    .refines("Sequence<i32>")
                    .with_member(Member::property(
                        "len",
                        Property::new(|listing: &Listing| listing.items.len()),
                    )),
            )
            .with_contract(
                ContractInfo::new("List<i32>", element)
                    .refines("Collection<i32>")
                    .with_member(Member::method(
                        "get",
                        Method::with_arg(|listing: &Listing, index: usize| {
                            listing.items.get(index).copied().unwrap_or_default()
                        }),
                    )),
            )
    }
}
