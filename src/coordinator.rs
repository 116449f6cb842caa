//! Adaptive two-speed poll loop.
//!
//! One logical worker drives fetch + normalize on a timer, republishes the
//! resulting record wholesale, and picks the next interval from the record's
//! fast-refresh flag. Subscribers only ever read the latest published state.

use crate::config::TeamConfig;
use chrono::Utc;
use log::{debug, error, info};
use nfl_api::client::{ApiError, NflApi};
use nfl_api::{GameRecord, normalize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Off-game polling cadence.
pub const SLOW_INTERVAL: Duration = Duration::from_secs(600);
/// Cadence near and during live play.
pub const FAST_INTERVAL: Duration = Duration::from_secs(5);

/// Latest state visible to subscribers. On a failed refresh the record goes
/// stale rather than away; only `available` flips.
#[derive(Debug, Clone, Default)]
pub struct PublishedState {
    pub record: Option<Arc<GameRecord>>,
    pub available: bool,
}

#[derive(Debug)]
pub enum UpdateError {
    Timeout(Duration),
    Api(ApiError),
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateError::Timeout(deadline) => {
                write!(f, "update timed out after {}s", deadline.as_secs())
            }
            UpdateError::Api(e) => write!(f, "update failed: {e}"),
        }
    }
}

impl std::error::Error for UpdateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpdateError::Api(e) => Some(e),
            UpdateError::Timeout(_) => None,
        }
    }
}

impl From<ApiError> for UpdateError {
    fn from(e: ApiError) -> Self {
        UpdateError::Api(e)
    }
}

/// The coordinator's mutable state: current interval plus the outcome of the
/// most recent poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    pub interval: Duration,
    pub last_update_success: bool,
}

impl Default for PollState {
    fn default() -> Self {
        Self {
            interval: SLOW_INTERVAL,
            last_update_success: false,
        }
    }
}

impl PollState {
    /// Level-triggered: the interval is recomputed from the fresh record on
    /// every successful poll, never from interval history.
    fn apply_success(&mut self, record: &GameRecord) {
        self.last_update_success = true;
        self.interval = if record.private_fast_refresh {
            FAST_INTERVAL
        } else {
            SLOW_INTERVAL
        };
    }

    /// Failures leave the interval untouched.
    fn apply_failure(&mut self) {
        self.last_update_success = false;
    }
}

/// Owns the api client, the team config, and the publication channel.
/// Inject it into whatever presents the record.
pub struct PollCoordinator {
    api: NflApi,
    config: TeamConfig,
    state: PollState,
    publisher: watch::Sender<PublishedState>,
}

impl PollCoordinator {
    pub fn new(config: TeamConfig) -> Self {
        Self::with_api(config, NflApi::new())
    }

    /// Build around a specific client. Used by tests to point at a mock host.
    pub fn with_api(config: TeamConfig, api: NflApi) -> Self {
        let (publisher, _) = watch::channel(PublishedState::default());
        Self {
            api,
            config,
            state: PollState::default(),
            publisher,
        }
    }

    pub fn config(&self) -> &TeamConfig {
        &self.config
    }

    pub fn poll_state(&self) -> &PollState {
        &self.state
    }

    /// Watch the published record. Receivers always observe the latest
    /// state and never block the poll loop.
    pub fn subscribe(&self) -> watch::Receiver<PublishedState> {
        self.publisher.subscribe()
    }

    /// One poll cycle under the configured overall deadline.
    ///
    /// Exceeding the deadline drops the in-flight request and counts as a
    /// failure; so does any transport error from the fetch. Both leave the
    /// previously published record in place with `available` flipped false.
    pub async fn refresh(&mut self) -> Result<Arc<GameRecord>, UpdateError> {
        let deadline = self.config.timeout();
        match tokio::time::timeout(deadline, self.update_game()).await {
            Ok(Ok(record)) => {
                let record = Arc::new(record);
                self.state.apply_success(&record);
                self.publisher.send_replace(PublishedState {
                    record: Some(record.clone()),
                    available: true,
                });
                debug!(
                    "{}: refresh ok (state {:?}), next poll in {:?}",
                    self.config.name, record.state, self.state.interval
                );
                Ok(record)
            }
            Ok(Err(e)) => {
                self.mark_failed();
                Err(UpdateError::Api(e))
            }
            Err(_elapsed) => {
                self.mark_failed();
                Err(UpdateError::Timeout(deadline))
            }
        }
    }

    fn mark_failed(&mut self) {
        self.state.apply_failure();
        // Stale record stays published; only availability changes.
        self.publisher.send_modify(|p| p.available = false);
    }

    async fn update_game(&self) -> Result<GameRecord, ApiError> {
        let doc = self.api.fetch_scoreboard().await?;
        Ok(normalize(doc.as_ref(), &self.config.team_abbr, Utc::now()))
    }

    /// Drive the poll loop forever: refresh, then sleep the current
    /// interval. One outstanding poll at a time; the host aborts the task
    /// on shutdown.
    pub async fn run(mut self) {
        info!(
            "starting poll loop for {} ({})",
            self.config.name, self.config.team_abbr
        );
        loop {
            if let Err(e) = self.refresh().await {
                error!("{}: {e}", self.config.name);
            }
            tokio::time::sleep(self.state.interval).await;
        }
    }
}
