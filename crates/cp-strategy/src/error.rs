use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("unknown scheduling strategy {0:?}: expected \"sequential\", \"day_night_split\", or \"spatial_interleaved\"")]
    Unknown(String),
}
