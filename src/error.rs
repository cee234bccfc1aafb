use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<DashboardError> for String {
    fn from(err: DashboardError) -> Self {
        err.to_string()
    }
}

impl From<gloo_net::Error> for DashboardError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => DashboardError::Malformed(e.to_string()),
            other => DashboardError::Network(other.to_string()),
        }
    }
}
