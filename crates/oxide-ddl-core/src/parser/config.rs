//! Parser configuration.

/// Tunables for a [`Parser`](super::Parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting of expressions and subqueries before the parser gives
    /// up with `RecursionLimitExceeded`.
    pub max_depth: usize,
}

impl ParserConfig {
    /// Default for [`ParserConfig::max_depth`].
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    /// Sets the maximum nesting depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
