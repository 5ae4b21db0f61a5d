use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::NotificationRequest;
use crate::notifier::{Notifier, NotifyError};

const STARTTLS_PORT: u16 = 587;
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection details for an authenticated SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub sender_name: String,
}

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(settings: &SmtpSettings) -> Result<Self, NotifyError> {
        let address: Address = settings
            .username
            .parse()
            .map_err(|source| NotifyError::Address {
                address: settings.username.clone(),
                source,
            })?;
        let from = Mailbox::new(Some(settings.sender_name.clone()), address);

        // Port 587 upgrades a plain connection; anything else expects implicit TLS.
        let builder = if settings.port == STARTTLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        };

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(SEND_TIMEOUT))
            .build();

        Ok(Self { transport, from })
    }

    fn build_message(&self, request: &NotificationRequest) -> Result<Message, NotifyError> {
        let to: Mailbox = request
            .recipient
            .parse()
            .map_err(|source| NotifyError::Address {
                address: request.recipient.clone(),
                source,
            })?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(request.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(request.body.clone())?;

        Ok(message)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        let message = self.build_message(request)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(username: &str) -> SmtpSettings {
        SmtpSettings {
            host: "smtp.example.com".into(),
            port: 465,
            username: username.into(),
            password: "secret".into(),
            sender_name: "Tracker Bot".into(),
        }
    }

    fn request(recipient: &str) -> NotificationRequest {
        NotificationRequest {
            recipient: recipient.into(),
            subject: "Website Update Detected!".into(),
            body: "A change was detected at:\nhttps://example.com".into(),
        }
    }

    #[tokio::test]
    async fn test_invalid_sender_rejected() {
        let err = SmtpNotifier::new(&settings("not an address")).err().unwrap();
        assert!(matches!(err, NotifyError::Address { .. }));
    }

    #[tokio::test]
    async fn test_message_headers() {
        let notifier = SmtpNotifier::new(&settings("bot@example.com")).unwrap();
        let message = notifier.build_message(&request("me@example.com")).unwrap();
        let text = String::from_utf8(message.formatted()).unwrap();

        assert!(text.contains("Tracker Bot"));
        assert!(text.contains("<bot@example.com>"));
        assert!(text.contains("To: me@example.com"));
        assert!(text.contains("Subject: Website Update Detected!"));
        assert!(text.contains("https://example.com"));
    }

    #[tokio::test]
    async fn test_starttls_port_accepted() {
        let mut s = settings("bot@example.com");
        s.port = 587;
        assert!(SmtpNotifier::new(&s).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_recipient_rejected() {
        let notifier = SmtpNotifier::new(&settings("bot@example.com")).unwrap();
        let err = notifier.build_message(&request("nobody")).unwrap_err();
        assert!(matches!(err, NotifyError::Address { ref address, .. } if address == "nobody"));
    }
}
