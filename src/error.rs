use ansi_markup::RuleError;
use rulesheet::SheetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Rule sheet error: {0}")]
    Sheet(#[from] SheetError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
