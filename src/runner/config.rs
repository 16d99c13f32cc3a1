use crate::error::{Error, Result};
use crate::kernels::LoopOrder;
use crate::matrix::Layout;
use std::fmt;

pub const DEFAULT_TRIALS: usize = 5;
pub const DEFAULT_SEED: u64 = 0x5eed;

/// Whether a trial runs the kernel on the calling thread or across a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    Sequential,
    /// Rows of C split across a dedicated pool of `threads` workers.
    Parallel { threads: usize },
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Sequential => f.write_str("sequential"),
            ExecutionMode::Parallel { threads } => write!(f, "parallel({threads})"),
        }
    }
}

/// What to benchmark: A is `m × p`, B is `p × n`.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub m: usize,
    pub p: usize,
    pub n: usize,
    pub orders: Vec<LoopOrder>,
    pub trials: usize,
    pub layout: Layout,
    pub mode: ExecutionMode,
    pub seed: u64,
}

impl BenchConfig {
    /// All six orders, column-major, sequential, [`DEFAULT_TRIALS`] trials.
    pub fn new(m: usize, p: usize, n: usize) -> Self {
        Self {
            m,
            p,
            n,
            orders: LoopOrder::ALL.to_vec(),
            trials: DEFAULT_TRIALS,
            layout: Layout::default(),
            mode: ExecutionMode::default(),
            seed: DEFAULT_SEED,
        }
    }

    /// Square `size × size` problem.
    pub fn square(size: usize) -> Self {
        Self::new(size, size, size)
    }

    /// Build from operand shapes, rejecting `A.cols != B.rows`.
    pub fn from_shapes(a: (usize, usize), b: (usize, usize)) -> Result<Self> {
        if a.1 != b.0 {
            return Err(Error::mismatch("BenchConfig::from_shapes", (a.1, b.1), b));
        }
        Ok(Self::new(a.0, a.1, b.1))
    }

    pub fn with_orders(mut self, orders: impl Into<Vec<LoopOrder>>) -> Self {
        self.orders = orders.into();
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations that can't produce a measurement.
    ///
    /// Runs before anything is allocated or timed.
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(Error::config("trial count must be at least 1"));
        }
        if self.orders.is_empty() {
            return Err(Error::config("no loop orders selected"));
        }
        if self.m == 0 || self.p == 0 || self.n == 0 {
            return Err(Error::config("matrix dimensions must be non-zero"));
        }
        if let ExecutionMode::Parallel { threads: 0 } = self.mode {
            return Err(Error::config("parallel mode needs at least one thread"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = BenchConfig::square(64);
        assert_eq!((cfg.m, cfg.p, cfg.n), (64, 64, 64));
        assert_eq!(cfg.orders.len(), 6);
        assert_eq!(cfg.layout, Layout::ColMajor);
        assert_eq!(cfg.mode, ExecutionMode::Sequential);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_from_shapes_mismatch() {
        let err = BenchConfig::from_shapes((2, 3), (4, 2)).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));

        let cfg = BenchConfig::from_shapes((2, 3), (3, 5)).unwrap();
        assert_eq!((cfg.m, cfg.p, cfg.n), (2, 3, 5));
    }

    #[test]
    fn test_validate_rejects_unrunnable() {
        let base = BenchConfig::square(8);
        let bad = [
            base.clone().with_trials(0),
            base.clone().with_orders(Vec::new()),
            BenchConfig::new(8, 0, 8),
            base.clone().with_mode(ExecutionMode::Parallel { threads: 0 }),
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate(), Err(Error::InvalidConfiguration { .. })),
                "{cfg:?}"
            );
        }
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(ExecutionMode::Parallel { threads: 4 }.to_string(), "parallel(4)");
    }
}
