pub mod booking;
pub mod gateway;
pub mod payment;
pub mod rooms;
pub mod session;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Backend error ({status}): {message}")]
    BackendError { status: u16, message: String },
    #[error("Payment cancelled by guest")]
    PaymentCancelled,
}

pub type CoreResult<T> = Result<T, CoreError>;
