pub mod smtp;

pub use smtp::SmtpNotifier;

use async_trait::async_trait;
use lettre::address::AddressError;

use crate::domain::NotificationRequest;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid mail address {address:?}: {source}")]
    Address {
        address: String,
        #[source]
        source: AddressError,
    },

    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

#[async_trait]
pub trait Notifier {
    async fn send(&self, request: &NotificationRequest) -> Result<(), NotifyError>;
}
