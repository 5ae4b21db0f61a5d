use std::sync::Arc;
use std::time::Duration;

use crate::app::error::Result;
use crate::config::{Config, ConfigError};
use crate::coordinator::CheckCoordinator;
use crate::daemon::PingRelay;
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::notifier::{Notifier, SmtpNotifier};

/// Everything the long-running service needs, built once from validated config.
pub struct AppContext {
    pub port: u16,
    pub check_interval: Duration,
    pub ping_interval: Duration,
    pub coordinator: Arc<CheckCoordinator>,
    pub ping_relay: Option<PingRelay>,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self> {
        let target_url = config.target_url()?;
        let smtp = config.smtp_settings()?;
        let recipient = config
            .recipient()
            .ok_or(ConfigError::Missing {
                key: "NOTIFY_RECIPIENT",
            })?
            .to_string();

        let http = HttpFetcher::new(config.request_timeout()?)?;
        let ping_relay = config
            .companion_url()?
            .map(|url| PingRelay::new(http.client().clone(), url));

        let fetcher: Arc<dyn PageFetcher + Send + Sync> = Arc::new(http);
        let notifier: Arc<dyn Notifier + Send + Sync> = Arc::new(SmtpNotifier::new(&smtp)?);
        let coordinator = Arc::new(CheckCoordinator::new(
            target_url.as_str(),
            recipient,
            fetcher,
            notifier,
        ));

        Ok(Self {
            port: config.port,
            check_interval: config.check_interval()?,
            ping_interval: config.ping_interval()?,
            coordinator,
            ping_relay,
        })
    }
}
