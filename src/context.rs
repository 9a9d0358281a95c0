//! Run-scoped configuration shared read-only by every queued operation

/// Daemon address used when neither the command line nor the
/// configuration file overrides it.
pub const DEFAULT_API_URL: &str = "http://localhost:8081/";

/// API version prefix; every request path hangs off this.
pub const API_VERSION: &str = "v2";

/// Identifiers and switches for one client run. Built once before any
/// operation executes, never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Container to operate on. Empty when no container operation is queued.
    pub container: String,
    /// Host to operate on. Empty means all hosts.
    pub host: String,
    /// Pool to create containers in. Empty means no pool.
    pub pool: String,
    /// Daemon base URL override.
    pub api_base_url: Option<String>,
    /// Resolve requests without sending them.
    pub dry_run: bool,
}

impl Context {
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// Effective base URL, with a guaranteed trailing slash.
    pub fn api_url(&self) -> String {
        let base = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_URL);
        if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        }
    }
}

#[derive(Debug, Default)]
pub struct ContextBuilder {
    context: Context,
}

impl ContextBuilder {
    pub fn container(mut self, name: impl Into<String>) -> Self {
        self.context.container = name.into();
        self
    }

    pub fn host(mut self, name: impl Into<String>) -> Self {
        self.context.host = name.into();
        self
    }

    pub fn pool(mut self, name: impl Into<String>) -> Self {
        self.context.pool = name.into();
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.context.api_base_url = Some(url.into());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.context.dry_run = dry_run;
        self
    }

    pub fn build(self) -> Context {
        self.context
    }
}
