//! Selection of the cheapest matcher representation for a value set.

use crate::bitset::BitsetMatcher;
use crate::digit::Matcher;
use crate::interval_list::IntervalListMatcher;
use crate::range::{FieldBounds, Range, RangeSet};
use crate::range_list::RangeListMatcher;
use crate::simple::{ConstantMatcher, IntervalMatcher, SteppingMatcher};
use crate::table::TableMatcher;

/// Above this many merged ranges a bitset amortizes better than binary
/// searching a list.
const LIST_LIMIT: usize = 10;

/// Builds the cheapest matcher for a validated value set and the field's
/// natural bounds.
///
/// Selection policy, in order: a single range maps straight to
/// constant/interval/stepping; multi-range sets with a small absolute span
/// use the dense table; sets with overlapping strided ranges use the bitset;
/// remaining sets are sorted, overlapping unit-step neighbors merged, then
/// dispatched to a list matcher (or back to a single-range matcher if the
/// merge collapsed them, or to the bitset if too many ranges survive).
pub fn build_matcher(set: &RangeSet, bounds: FieldBounds) -> Matcher {
    if set.is_single() {
        return simple_matcher(set.first(), bounds);
    }

    let resolved = set.resolved(bounds);
    let (min, max) = (resolved.min(), resolved.max());

    if max - min < TableMatcher::SPAN_LIMIT {
        return Matcher::Table(TableMatcher::new(&resolved));
    }

    let sorted = resolved.sorted();
    if !sorted.is_simple() {
        return Matcher::Bitset(BitsetMatcher::new(&resolved));
    }

    let merged = sorted.merged();
    if merged.is_single() {
        return simple_matcher(merged.first(), bounds);
    }
    if merged.len() > LIST_LIMIT {
        return Matcher::Bitset(BitsetMatcher::new(&merged));
    }

    if merged.all_unit_step() {
        Matcher::IntervalList(IntervalListMatcher::new(&merged))
    } else {
        Matcher::RangeList(RangeListMatcher::new(&merged))
    }
}

fn simple_matcher(range: &Range, bounds: FieldBounds) -> Matcher {
    if range.is_asterisk() {
        return if range.is_stepped() {
            Matcher::Stepping(SteppingMatcher::new(bounds.min, bounds.max, range.step()))
        } else {
            Matcher::Interval(IntervalMatcher::new(bounds.min, bounds.max))
        };
    }
    if range.is_constant() {
        return Matcher::Constant(ConstantMatcher::new(range.min()));
    }
    if range.is_stepped() {
        Matcher::Stepping(SteppingMatcher::new(range.min(), range.max(), range.step()))
    } else {
        Matcher::Interval(IntervalMatcher::new(range.min(), range.max()))
    }
}
