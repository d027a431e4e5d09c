//! Order-identifier allocation.

use common::OrderId;

/// Strategy for computing the next order identifier.
///
/// The encoding is pluggable; every strategy must be deterministic for the
/// same input and must produce an id strictly greater than any previously
/// allocated one. Allocation reads the current maximum from the store and
/// the insert carries the result, so the strategy itself holds no state.
pub trait OrderIdStrategy: Send + Sync {
    /// Computes the next id given the current maximum, or the fixed base
    /// when no prior id exists.
    fn next(&self, latest: Option<&OrderId>) -> OrderId;
}

/// Default strategy: zero-padded decimal ids.
///
/// With the default width of 10 the first allocated id is `"0000000001"`
/// and successors increment numerically, so lexical and numeric ordering
/// agree for all ids within the width. A latest id that does not parse as
/// a number falls back to the base.
#[derive(Debug, Clone)]
pub struct SequentialIdStrategy {
    width: usize,
    base: u64,
}

impl SequentialIdStrategy {
    /// Creates a strategy with the given padding width and base value.
    pub fn new(width: usize, base: u64) -> Self {
        Self { width, base }
    }
}

impl Default for SequentialIdStrategy {
    fn default() -> Self {
        Self { width: 10, base: 1 }
    }
}

impl OrderIdStrategy for SequentialIdStrategy {
    fn next(&self, latest: Option<&OrderId>) -> OrderId {
        let next = match latest {
            Some(id) => id
                .as_str()
                .parse::<u64>()
                .map(|n| n + 1)
                .unwrap_or(self.base),
            None => self.base,
        };
        OrderId::new(format!("{next:0width$}", width = self.width))
    }
}
