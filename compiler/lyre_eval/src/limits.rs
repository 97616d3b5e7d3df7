//! Evaluation limits.

/// Depth used when nothing else is configured.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Environment variable overriding [`EvalLimits::max_depth`].
pub const MAX_DEPTH_VAR: &str = "LYRE_MAX_DEPTH";

/// Bounds applied to one evaluation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalLimits {
    /// Maximum number of nested blocks and constructions.
    pub max_depth: usize,
}

impl Default for EvalLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EvalLimits {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Defaults, with `LYRE_MAX_DEPTH` applied when set.
    pub fn from_env() -> Self {
        Self::from_var(std::env::var(MAX_DEPTH_VAR).ok().as_deref())
    }

    fn from_var(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        match value.trim().parse::<usize>() {
            Ok(depth) if depth > 0 => Self::default().with_max_depth(depth),
            _ => {
                tracing::warn!(
                    var = MAX_DEPTH_VAR,
                    value,
                    default = DEFAULT_MAX_DEPTH,
                    "ignoring invalid depth limit"
                );
                Self::default()
            }
        }
    }
}
