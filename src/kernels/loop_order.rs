use crate::error::Error;
use crate::matrix::Layout;
use std::fmt;
use std::str::FromStr;

/// One of the three loop indices of `C[i,j] += A[i,k] * B[k,j]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Index {
    /// Row of A and C.
    I,
    /// Column of B and C.
    J,
    /// Shared inner dimension.
    K,
}

/// Nesting order of the triple loop, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopOrder {
    Ijk,
    Ikj,
    Jik,
    Jki,
    Kij,
    Kji,
}

impl LoopOrder {
    pub const ALL: [LoopOrder; 6] = [
        LoopOrder::Ijk,
        LoopOrder::Ikj,
        LoopOrder::Jik,
        LoopOrder::Jki,
        LoopOrder::Kij,
        LoopOrder::Kji,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LoopOrder::Ijk => "ijk",
            LoopOrder::Ikj => "ikj",
            LoopOrder::Jik => "jik",
            LoopOrder::Jki => "jki",
            LoopOrder::Kij => "kij",
            LoopOrder::Kji => "kji",
        }
    }

    /// Loop indices from outermost to innermost.
    pub fn nesting(self) -> [Index; 3] {
        use Index::*;
        match self {
            LoopOrder::Ijk => [I, J, K],
            LoopOrder::Ikj => [I, K, J],
            LoopOrder::Jik => [J, I, K],
            LoopOrder::Jki => [J, K, I],
            LoopOrder::Kij => [K, I, J],
            LoopOrder::Kji => [K, J, I],
        }
    }

    pub fn innermost(self) -> Index {
        self.nesting()[2]
    }

    /// Order whose innermost loop walks every touched array with unit stride.
    ///
    /// Column-major: innermost `i` moves down columns of A and C while
    /// `B[k,j]` stays fixed, so `jki`. Row-major: innermost `j` moves along
    /// rows of B and C, so `ikj`.
    pub fn preferred(layout: Layout) -> LoopOrder {
        match layout {
            Layout::ColMajor => LoopOrder::Jki,
            Layout::RowMajor => LoopOrder::Ikj,
        }
    }

    /// Whether the innermost loop is unit stride on all arrays it indexes
    /// when every operand is stored in `layout`.
    pub fn is_unit_stride(self, layout: Layout) -> bool {
        matches!(
            (layout, self.innermost()),
            (Layout::ColMajor, Index::I) | (Layout::RowMajor, Index::J)
        )
    }
}

impl fmt::Display for LoopOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoopOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoopOrder::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::config(format!("unsupported loop order '{s}'")))
    }
}
