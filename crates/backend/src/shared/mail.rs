use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::OnceCell;

static MAILER: OnceCell<Arc<dyn MailSender>> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Out-of-band delivery of messages to users
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Delivers the message or reports why it could not
    async fn send(&self, message: MailMessage) -> anyhow::Result<()>;
}

/// Writes messages to the log instead of delivering them
pub struct LogMailSender {
    from: String,
}

impl LogMailSender {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, message: MailMessage) -> anyhow::Result<()> {
        if !message.to.contains('@') {
            anyhow::bail!("Invalid recipient address: {}", message.to);
        }
        tracing::info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            "Mail dispatched"
        );
        Ok(())
    }
}

/// Install the process-wide mail sender (once, at startup)
pub fn install(sender: Arc<dyn MailSender>) -> anyhow::Result<()> {
    MAILER
        .set(sender)
        .map_err(|_| anyhow::anyhow!("Mail sender already installed"))
}

/// Process-wide mail sender; a logging sender when none was installed
pub fn mailer() -> Arc<dyn MailSender> {
    MAILER
        .get_or_init(|| Arc::new(LogMailSender::new("no-reply@club.local")))
        .clone()
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Keeps every message for assertions; optionally fails every send
    #[derive(Default)]
    pub struct RecordingMailSender {
        pub sent: Mutex<Vec<MailMessage>>,
        pub fail: bool,
    }

    impl RecordingMailSender {
        pub fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub fn messages(&self) -> Vec<MailMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MailSender for RecordingMailSender {
        async fn send(&self, message: MailMessage) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("SMTP server unavailable");
            }
            self.sent.lock().unwrap().push(message);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_sender_rejects_bad_recipient() {
        let sender = LogMailSender::new("club@example.com");
        let message = MailMessage {
            to: "nobody".into(),
            subject: "s".into(),
            body: "b".into(),
        };
        assert!(sender.send(message.clone()).await.is_err());

        let message = MailMessage {
            to: "ana@example.com".into(),
            ..message
        };
        assert!(sender.send(message).await.is_ok());
    }
}
