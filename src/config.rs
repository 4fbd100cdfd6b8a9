/// Tunables for an [`crate::Evaluator`] and for tree evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Number of tokenized expressions kept in the LRU cache. `0` disables caching.
    pub cache_size: usize,
    /// Fail with [`crate::ExpressionError::DivisionByZero`] instead of producing `inf`/`NaN`.
    pub reject_division_by_zero: bool,
    /// Fail with [`crate::ExpressionError::NonFiniteResult`] when the final value is `inf`/`NaN`.
    pub reject_non_finite: bool,
    /// Deepest allowed nesting of groups and prefix minuses.
    pub max_nesting_depth: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            cache_size: 100,
            reject_division_by_zero: false,
            reject_non_finite: false,
            max_nesting_depth: 100,
        }
    }
}

impl EvaluatorConfig {
    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = cache_size;
        self
    }

    pub fn with_reject_division_by_zero(mut self, reject: bool) -> Self {
        self.reject_division_by_zero = reject;
        self
    }

    pub fn with_reject_non_finite(mut self, reject: bool) -> Self {
        self.reject_non_finite = reject;
        self
    }

    pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }
}
