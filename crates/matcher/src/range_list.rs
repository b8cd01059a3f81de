//! List-of-strided-ranges matcher: a few disjoint ranges with mixed strides,
//! binary searched.

use crate::bitset::BitsetMatcher;
use crate::digit::DigitMatcher;
use crate::interval_list::interval_index;
use crate::range::RangeSet;

/// Matcher for a small number of sorted, disjoint ranges where at least one
/// carries a stride greater than one.
///
/// Like [`IntervalListMatcher`](crate::IntervalListMatcher) but with stride
/// arithmetic inside the located range. Stored upper bounds are normalized
/// down to the last in-stride value.
#[derive(Debug, Clone)]
pub struct RangeListMatcher {
    mins: Vec<i32>,
    maxs: Vec<i32>,
    steps: Vec<i32>,
    bits: BitsetMatcher,
    low: i32,
    high: i32,
}

impl RangeListMatcher {
    /// Builds the matcher from a sorted, disjoint range set.
    pub fn new(set: &RangeSet) -> Self {
        let mins: Vec<i32> = set.iter().map(|r| r.min()).collect();
        let maxs: Vec<i32> = set
            .iter()
            .map(|r| r.max() - (r.max() - r.min()) % r.step())
            .collect();
        let steps: Vec<i32> = set.iter().map(|r| r.step()).collect();
        let bits = BitsetMatcher::new(set);
        let low = mins[0];
        let high = *maxs.last().expect("non-empty set");
        Self {
            mins,
            maxs,
            steps,
            bits,
            low,
            high,
        }
    }

    fn last(&self) -> usize {
        self.mins.len() - 1
    }
}

impl DigitMatcher for RangeListMatcher {
    fn matches(&self, value: i32) -> bool {
        self.bits.matches(value)
    }

    fn is_above(&self, value: i32) -> bool {
        value > self.high
    }

    fn is_below(&self, value: i32) -> bool {
        value < self.low
    }

    fn next(&self, value: i32) -> i32 {
        match interval_index(&self.mins, value) {
            Some(index) if value < self.maxs[index] => {
                let step = self.steps[index];
                let r = (value - self.mins[index]) % step;
                value - r + step
            }
            Some(index) if index < self.last() => self.mins[index + 1],
            None => self.mins[0],
            // unreachable when has_next was consulted first
            _ => value + 1,
        }
    }

    fn prev(&self, value: i32) -> i32 {
        let Some(index) = interval_index(&self.mins, value) else {
            // unreachable when has_prev was consulted first
            return value - 1;
        };
        if value > self.maxs[index] {
            // in the gap after range `index`, or past the last range
            return self.maxs[index];
        }
        if value > self.mins[index] {
            let step = self.steps[index];
            let r = (value - self.mins[index]) % step;
            return if r > 0 { value - r } else { value - step };
        }
        if index > 0 {
            self.maxs[index - 1]
        } else {
            // unreachable when has_prev was consulted first
            value - 1
        }
    }

    fn has_next(&self, value: i32) -> bool {
        value < self.high
    }

    fn has_prev(&self, value: i32) -> bool {
        value > self.low
    }

    fn low(&self) -> i32 {
        self.low
    }

    fn high(&self) -> i32 {
        self.high
    }
}
