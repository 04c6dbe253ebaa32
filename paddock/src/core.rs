use std::sync::Arc;

use paddock_core::{Endpoints, FeedConnector, PaddockConfig, PaddockError};

/// Orchestrator that discovers meetings and assembles gear-change reports.
pub struct Paddock {
    pub(crate) connector: Arc<dyn FeedConnector>,
    pub(crate) cfg: PaddockConfig,
}

/// Builder for constructing a `Paddock` orchestrator with custom configuration.
pub struct PaddockBuilder {
    connector: Option<Arc<dyn FeedConnector>>,
    cfg: PaddockConfig,
}

impl Default for PaddockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PaddockBuilder {
    /// Create a new builder with default endpoints and knobs.
    ///
    /// A connector must be registered via [`with_connector`](Self::with_connector)
    /// before building.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connector: None,
            cfg: PaddockConfig::default(),
        }
    }

    /// Register the upstream connector. A later call replaces an earlier one.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn FeedConnector>) -> Self {
        self.connector = Some(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: PaddockConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Override the upstream endpoints.
    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.cfg.endpoints = endpoints;
        self
    }

    /// Highest race number probed per meeting.
    #[must_use]
    pub const fn max_races(mut self, n: u32) -> Self {
        self.cfg.max_races = n;
        self
    }

    /// Consecutive empty races that end extraction for a meeting.
    #[must_use]
    pub const fn empty_race_streak(mut self, n: u32) -> Self {
        self.cfg.empty_race_streak = n;
        self
    }

    /// Meetings extracted concurrently.
    ///
    /// Races within a meeting are always fetched one after another, and the
    /// report keeps discovery order whatever this is set to.
    #[must_use]
    pub const fn meeting_concurrency(mut self, n: usize) -> Self {
        self.cfg.meeting_concurrency = n;
        self
    }

    /// Build the `Paddock` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connector was registered or a knob is zero.
    pub fn build(self) -> Result<Paddock, PaddockError> {
        let Some(connector) = self.connector else {
            return Err(PaddockError::InvalidArg(
                "no connector registered; add one via with_connector(...)".to_string(),
            ));
        };
        if self.cfg.max_races == 0 {
            return Err(PaddockError::InvalidArg("max_races must be >= 1".into()));
        }
        if self.cfg.empty_race_streak == 0 {
            return Err(PaddockError::InvalidArg(
                "empty_race_streak must be >= 1".into(),
            ));
        }
        if self.cfg.meeting_concurrency == 0 {
            return Err(PaddockError::InvalidArg(
                "meeting_concurrency must be >= 1".into(),
            ));
        }
        Ok(Paddock {
            connector,
            cfg: self.cfg,
        })
    }
}

impl Paddock {
    /// Start building a new `Paddock` instance.
    ///
    /// ```rust,ignore
    /// let paddock = Paddock::builder()
    ///     .with_connector(connector)
    ///     .max_races(12)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> PaddockBuilder {
        PaddockBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PaddockConfig {
        &self.cfg
    }

    /// Name of the registered connector.
    #[must_use]
    pub fn connector_name(&self) -> &'static str {
        self.connector.name()
    }
}
