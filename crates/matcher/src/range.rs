//! Value ranges and per-field range sets.

use std::fmt;

/// Natural bounds of one calendar field, used to resolve asterisk ranges and
/// to pick matcher representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBounds {
    /// Smallest natural value of the field.
    pub min: i32,
    /// Largest natural value of the field.
    pub max: i32,
}

impl FieldBounds {
    /// Creates bounds from an inclusive pair.
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

/// One inclusive range of legal values with an optional stride.
///
/// A single constant is a range with `min == max`. An asterisk range means
/// "every value of the field" (optionally strided) and carries no bounds of
/// its own until resolved against the field's [`FieldBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    min: i32,
    max: i32,
    step: i32,
    asterisk: bool,
}

impl Range {
    /// The plain asterisk range `*`.
    pub fn any() -> Self {
        Self {
            min: -1,
            max: -1,
            step: 1,
            asterisk: true,
        }
    }

    /// The strided asterisk range `*/step`.
    pub fn any_step(step: i32) -> Self {
        Self {
            min: -1,
            max: -1,
            step,
            asterisk: true,
        }
    }

    /// A single constant value.
    pub fn value(value: i32) -> Self {
        Self {
            min: value,
            max: value,
            step: 1,
            asterisk: false,
        }
    }

    /// An inclusive unit-step range `min-max`.
    pub fn span(min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            step: 1,
            asterisk: false,
        }
    }

    /// An inclusive strided range `min-max/step`.
    pub fn stepped(min: i32, max: i32, step: i32) -> Self {
        Self {
            min,
            max,
            step,
            asterisk: false,
        }
    }

    /// Lower bound. Meaningless for unresolved asterisk ranges.
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound. Meaningless for unresolved asterisk ranges.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Stride between admitted values.
    pub fn step(&self) -> i32 {
        self.step
    }

    /// Returns true for `*` and `*/n` ranges.
    pub fn is_asterisk(&self) -> bool {
        self.asterisk
    }

    /// Returns true if the stride is greater than one.
    pub fn is_stepped(&self) -> bool {
        self.step > 1
    }

    /// Returns true for a single constant value.
    pub fn is_constant(&self) -> bool {
        self.min == self.max && !self.asterisk
    }

    /// Replaces an asterisk range with the concrete field bounds, keeping the
    /// stride. Concrete ranges pass through unchanged.
    pub fn resolved(&self, bounds: FieldBounds) -> Range {
        if self.asterisk {
            Range::stepped(bounds.min, bounds.max, self.step)
        } else {
            *self
        }
    }

    /// Returns true if two concrete ranges overlap.
    pub fn intersects(&self, other: &Range) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Returns the union of two overlapping unit-step ranges.
    pub fn merged(&self, other: &Range) -> Range {
        Range::span(self.min.min(other.min), self.max.max(other.max))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.asterisk {
            return if self.is_stepped() {
                write!(f, "*/{}", self.step)
            } else {
                write!(f, "*")
            };
        }
        if self.is_constant() {
            return write!(f, "{}", self.min);
        }
        if self.is_stepped() {
            write!(f, "{}-{}/{}", self.min, self.max, self.step)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// An ordered, non-empty collection of [`Range`]s for one calendar field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSet(Vec<Range>);

impl RangeSet {
    /// Wraps a single range.
    pub fn single(range: Range) -> Self {
        Self(vec![range])
    }

    /// Wraps a list of ranges. The list must be non-empty.
    pub fn new(ranges: Vec<Range>) -> Self {
        debug_assert!(!ranges.is_empty(), "a range set holds at least one range");
        Self(ranges)
    }

    /// The plain asterisk set.
    pub fn any() -> Self {
        Self::single(Range::any())
    }

    /// Number of ranges in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: range sets are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the set is a single range.
    pub fn is_single(&self) -> bool {
        self.0.len() == 1
    }

    /// The first range of the set.
    pub fn first(&self) -> &Range {
        &self.0[0]
    }

    /// Iterates the ranges in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Range> {
        self.0.iter()
    }

    /// Smallest lower bound across the set. The set must be concrete.
    pub fn min(&self) -> i32 {
        self.0.iter().map(Range::min).min().expect("non-empty set")
    }

    /// Largest upper bound across the set. The set must be concrete.
    pub fn max(&self) -> i32 {
        self.0.iter().map(Range::max).max().expect("non-empty set")
    }

    /// Resolves every asterisk range against the field bounds.
    pub fn resolved(&self, bounds: FieldBounds) -> RangeSet {
        Self(self.0.iter().map(|r| r.resolved(bounds)).collect())
    }

    /// Returns a copy sorted by lower bound.
    pub fn sorted(&self) -> RangeSet {
        let mut ranges = self.0.clone();
        ranges.sort_by_key(Range::min);
        Self(ranges)
    }

    /// Returns true if no two overlapping ranges involve a stride.
    ///
    /// Overlapping unit-step ranges can be merged away; an overlap where
    /// either side is strided cannot, and forces the bitset representation.
    /// The set must be sorted.
    pub fn is_simple(&self) -> bool {
        self.0.windows(2).all(|pair| {
            !(pair[0].intersects(&pair[1]) && (pair[0].is_stepped() || pair[1].is_stepped()))
        })
    }

    /// Merges overlapping unit-step neighbors. The set must be sorted and
    /// simple.
    pub fn merged(&self) -> RangeSet {
        let mut ranges: Vec<Range> = Vec::with_capacity(self.0.len());
        for range in &self.0 {
            match ranges.last_mut() {
                Some(last) if last.intersects(range) => *last = last.merged(range),
                _ => ranges.push(*range),
            }
        }
        Self(ranges)
    }

    /// Returns true if every range has a unit stride.
    pub fn all_unit_step(&self) -> bool {
        self.0.iter().all(|r| r.step() == 1)
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}
