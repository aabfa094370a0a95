use thiserror::Error;

#[derive(Debug, Error)]
pub enum NozzleError {
    #[error("Numerical convergence error: {0}")]
    NumericalConvergence(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
