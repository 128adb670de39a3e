use strum::Display as StrumDisplay;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum AssetKind {
    Ball,
    Arrow,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Notify interval must not be negative (got {0} ms)")]
    NegativeInterval(i64),
    #[error("Missing required {0} sprite")]
    MissingAsset(AssetKind),
    #[error("Script line {line}: {reason}")]
    Script { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
