//! `AgentBuilder`: assembling an agent from its parts.

use tablebot_agent::{
    AgentConfig, AgentError, AgentEvent, EventKind, Observer, Observers,
    Strategy,
};
use tablebot_protocol::RegisterRequest;
use tablebot_transport::{ClientConfig, GameApi, HttpClient};

use crate::Agent;

/// Builder for an [`Agent`].
///
/// The strategy is set last-or-anywhere with
/// [`strategy`](Self::strategy); until then the builder cannot build.
///
/// # Example
///
/// ```rust,ignore
/// let mut agent = Agent::builder()
///     .api_key(key)
///     .config(AgentConfig::for_table("main"))
///     .strategy(MyStrategy::default())
///     .connect()
///     .await?;
/// agent.run().await?;
/// ```
pub struct AgentBuilder<S = ()> {
    config: AgentConfig,
    client_config: ClientConfig,
    api_key: Option<String>,
    registration: Option<RegisterRequest>,
    observers: Observers,
    strategy: S,
}

impl AgentBuilder<()> {
    /// Creates a builder with default settings and no strategy.
    pub fn new() -> Self {
        Self {
            config: AgentConfig::default(),
            client_config: ClientConfig::default(),
            api_key: None,
            registration: None,
            observers: Observers::new(),
            strategy: (),
        }
    }
}

impl Default for AgentBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> AgentBuilder<S> {
    /// Sets table, cadence, and recovery settings.
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets where the game service lives and the request timeout.
    pub fn client_config(mut self, config: ClientConfig) -> Self {
        self.client_config = config;
        self
    }

    /// Sets the credential. An empty key counts as none.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    /// Registers a new agent on connect when no API key is set.
    pub fn register_as(mut self, request: RegisterRequest) -> Self {
        self.registration = Some(request);
        self
    }

    /// Adds an observer for every event.
    pub fn observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observers.subscribe(observer);
        self
    }

    /// Adds a callback for one kind of event.
    pub fn on<F>(mut self, kind: EventKind, callback: F) -> Self
    where
        F: FnMut(&AgentEvent<'_>) + Send + 'static,
    {
        self.observers.on(kind, callback);
        self
    }

    /// Sets the strategy that decides our actions.
    pub fn strategy<T: Strategy>(self, strategy: T) -> AgentBuilder<T> {
        AgentBuilder {
            config: self.config,
            client_config: self.client_config,
            api_key: self.api_key,
            registration: self.registration,
            observers: self.observers,
            strategy,
        }
    }
}

impl<S: Strategy> AgentBuilder<S> {
    /// Builds an agent talking to the game service over HTTP.
    ///
    /// Without an API key, registers first using the request given to
    /// [`register_as`](Self::register_as). The new key is logged as
    /// issued (not its value) and available from
    /// [`Agent::registration`].
    ///
    /// # Errors
    /// - [`AgentError::InvalidConfig`] with neither a key nor a
    ///   registration request, or when the client cannot be built.
    /// - [`AgentError::Transport`] when registration fails.
    pub async fn connect(self) -> Result<Agent<S, HttpClient>, AgentError> {
        let (api_key, registration) = match (&self.api_key, &self.registration) {
            (Some(key), _) => (key.clone(), None),
            (None, Some(request)) => {
                let registration =
                    HttpClient::register(&self.client_config, request).await?;
                tracing::info!(
                    agent_id = %registration.agent_id,
                    chips = registration.chips,
                    "registered new agent"
                );
                tracing::warn!(
                    "a new API key was issued and will not be shown again; persist it"
                );
                (registration.api_key.clone(), Some(registration))
            }
            (None, None) => {
                return Err(AgentError::InvalidConfig(
                    "no API key and no registration request".into(),
                ));
            }
        };

        let api = HttpClient::new(&api_key, &self.client_config)
            .map_err(|e| AgentError::InvalidConfig(e.to_string()))?;
        tracing::debug!(base_url = %api.base_url(), "http client ready");

        Ok(Agent::new(
            api,
            self.strategy,
            self.config,
            self.observers,
            registration,
        ))
    }

    /// Builds an agent around any [`GameApi`] implementation.
    pub fn build_with<A: GameApi>(self, api: A) -> Agent<S, A> {
        Agent::new(api, self.strategy, self.config, self.observers, None)
    }
}
