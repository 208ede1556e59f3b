//! Parser resource limits.
//!
//! Nesting depth is the only resource guard: string and number lexing is
//! iterative and bounded by the input itself.

/// Default ceiling on array/object nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Limits applied by a [`Parser`](crate::Parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of nested arrays/objects. A document nested exactly
    /// this deep parses; one level more fails with `MaxDepthExceeded`.
    pub max_depth: usize,
}

impl Limits {
    /// Tight limits for untrusted input.
    pub const fn strict() -> Self {
        Self { max_depth: 32 }
    }

    /// Generous limits for trusted, machine-generated documents.
    pub const fn lenient() -> Self {
        Self { max_depth: 512 }
    }

    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
