//! Scheduling strategy tag.

use std::fmt;
use std::str::FromStr;

use crate::StrategyError;

/// How a group of operations is ordered and timed.
///
/// Chosen per cluster, falling back to the leg's strategy, then to
/// [`Strategy::Sequential`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Author order, no waits.
    #[default]
    Sequential,
    /// Author order; daylight-dependent operations wait for their window.
    DayNightSplit,
    /// Reordered to minimise transit distance.  Ignores causal
    /// dependencies such as deploy-before-recover.
    SpatialInterleaved,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Sequential         => "sequential",
            Strategy::DayNightSplit      => "day_night_split",
            Strategy::SpatialInterleaved => "spatial_interleaved",
        }
    }

    /// `true` if the scheduler must apply day/night waits.
    #[inline]
    pub fn checks_daylight(self) -> bool {
        self == Strategy::DayNightSplit
    }

    /// `true` if the strategy may permute author order.
    #[inline]
    pub fn reorders(self) -> bool {
        self == Strategy::SpatialInterleaved
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sequential"          => Ok(Strategy::Sequential),
            "day_night_split"     => Ok(Strategy::DayNightSplit),
            "spatial_interleaved" => Ok(Strategy::SpatialInterleaved),
            other => Err(StrategyError::Unknown(other.to_owned())),
        }
    }
}
