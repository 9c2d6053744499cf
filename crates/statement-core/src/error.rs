use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatementError {
    #[error("Failed to read ledger: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse ledger: {0}")]
    Parse(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD or MM/DD/YYYY")]
    InvalidDate(String),

    #[error("Invalid statement month: {0}")]
    InvalidMonth(u32),

    #[error("Invalid statement year: {0}")]
    InvalidYear(i32),
}
