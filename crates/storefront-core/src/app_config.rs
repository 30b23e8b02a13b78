#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the storefront.
///
/// Credentials are optional here on purpose: a missing sheet id or password
/// only breaks the action that needs it, and that action reports it.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub sheet_id: Option<String>,
    pub api_key: Option<String>,
    pub sheet_name: String,
    pub sheet_range: String,
    pub sheets_base_url: String,
    pub checkout_password: Option<String>,
    pub order_endpoint: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("sheet_id", &self.sheet_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("sheet_name", &self.sheet_name)
            .field("sheet_range", &self.sheet_range)
            .field("sheets_base_url", &self.sheets_base_url)
            .field(
                "checkout_password",
                &self.checkout_password.as_ref().map(|_| "[redacted]"),
            )
            .field("order_endpoint", &self.order_endpoint)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
