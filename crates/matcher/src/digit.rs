//! The capability contract shared by every value-set matcher.

use crate::bitset::BitsetMatcher;
use crate::interval_list::IntervalListMatcher;
use crate::range_list::RangeListMatcher;
use crate::simple::{ConstantMatcher, IntervalMatcher, SteppingMatcher};
use crate::table::TableMatcher;

/// Membership, successor/predecessor, and bound queries for the legal values
/// of one calendar field.
///
/// # Contract
///
/// * `matches` may assume the value is within the field's natural bounds;
///   out-of-bounds values are screened by `is_above`/`is_below` first.
/// * `next`/`prev` must be guarded by `has_next`/`has_prev`: unguarded calls
///   return out-of-range sentinel values the search engine never consumes.
/// * Implementations are immutable after construction and safe to share
///   across concurrent lookups.
pub trait DigitMatcher {
    /// Returns true if `value` is admitted by the schedule for this field.
    fn matches(&self, value: i32) -> bool;

    /// Returns true if `value` is above the largest admitted value.
    fn is_above(&self, value: i32) -> bool;

    /// Returns true if `value` is below the smallest admitted value.
    fn is_below(&self, value: i32) -> bool;

    /// The smallest admitted value strictly greater than `value`.
    fn next(&self, value: i32) -> i32;

    /// The largest admitted value strictly less than `value`.
    fn prev(&self, value: i32) -> i32;

    /// Returns true if an admitted value greater than `value` exists.
    fn has_next(&self, value: i32) -> bool;

    /// Returns true if an admitted value less than `value` exists.
    fn has_prev(&self, value: i32) -> bool;

    /// The smallest admitted value.
    fn low(&self) -> i32;

    /// The largest admitted value.
    fn high(&self) -> i32;
}

/// Closed set of matcher representations, selected per field by the
/// [factory](crate::build_matcher) for the value set's size and structure.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// A single fixed value.
    Constant(ConstantMatcher),
    /// A contiguous unit-step interval.
    Interval(IntervalMatcher),
    /// A strided interval.
    Stepping(SteppingMatcher),
    /// Small-span sets: bitmask plus precomputed successor tables.
    Table(TableMatcher),
    /// Large-span sets: 64-bit-word bitmap with bit scans.
    Bitset(BitsetMatcher),
    /// A few disjoint unit-step intervals, binary searched.
    IntervalList(IntervalListMatcher),
    /// A few disjoint strided intervals, binary searched.
    RangeList(RangeListMatcher),
}

impl Matcher {
    fn as_digit(&self) -> &dyn DigitMatcher {
        match self {
            Matcher::Constant(m) => m,
            Matcher::Interval(m) => m,
            Matcher::Stepping(m) => m,
            Matcher::Table(m) => m,
            Matcher::Bitset(m) => m,
            Matcher::IntervalList(m) => m,
            Matcher::RangeList(m) => m,
        }
    }

    /// Short name of the selected representation, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Matcher::Constant(_) => "constant",
            Matcher::Interval(_) => "interval",
            Matcher::Stepping(_) => "stepping",
            Matcher::Table(_) => "table",
            Matcher::Bitset(_) => "bitset",
            Matcher::IntervalList(_) => "interval-list",
            Matcher::RangeList(_) => "range-list",
        }
    }
}

impl DigitMatcher for Matcher {
    fn matches(&self, value: i32) -> bool {
        self.as_digit().matches(value)
    }

    fn is_above(&self, value: i32) -> bool {
        self.as_digit().is_above(value)
    }

    fn is_below(&self, value: i32) -> bool {
        self.as_digit().is_below(value)
    }

    fn next(&self, value: i32) -> i32 {
        self.as_digit().next(value)
    }

    fn prev(&self, value: i32) -> i32 {
        self.as_digit().prev(value)
    }

    fn has_next(&self, value: i32) -> bool {
        self.as_digit().has_next(value)
    }

    fn has_prev(&self, value: i32) -> bool {
        self.as_digit().has_prev(value)
    }

    fn low(&self) -> i32 {
        self.as_digit().low()
    }

    fn high(&self) -> i32 {
        self.as_digit().high()
    }
}
