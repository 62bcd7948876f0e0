/// Helpdesk service configuration loaded from environment variables.
#[derive(Debug)]
pub struct HelpdeskConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session and pending-signup JWTs.
    pub jwt_secret: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// TCP port to listen on (default 3114). Env var: `HELPDESK_PORT`.
    pub helpdesk_port: u16,
    /// Comma-separated Host allow-list; empty permits every host.
    pub allowed_hosts: Vec<String>,
    /// Human-readable log output instead of JSON when set.
    pub debug: bool,
    /// Root directory for uploaded media (default "media").
    pub media_root: String,
    /// Mail gateway endpoint URL.
    pub mail_api_url: String,
    /// Mail gateway API key.
    pub mail_api_key: String,
    /// Sender address for outgoing mail.
    pub mail_from: String,
    /// Chat-completion API key; absent means the fake answer path is used.
    pub openai_api_key: Option<String>,
    /// Chat-completion model name (default "gpt-3.5-turbo").
    pub openai_model: String,
    /// Force the fake answer path even when an API key is configured.
    pub use_fake_ai: bool,
}

fn env_bool(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

impl HelpdeskConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            helpdesk_port: std::env::var("HELPDESK_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            allowed_hosts: std::env::var("ALLOWED_HOSTS")
                .ok()
                .map(|v| {
                    v.split(',')
                        .map(|h| h.trim().to_owned())
                        .filter(|h| !h.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            debug: env_bool("DEBUG"),
            media_root: std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_owned()),
            mail_api_url: std::env::var("MAIL_API_URL").expect("MAIL_API_URL"),
            mail_api_key: std::env::var("MAIL_API_KEY").expect("MAIL_API_KEY"),
            mail_from: std::env::var("MAIL_FROM").expect("MAIL_FROM"),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".to_owned()),
            use_fake_ai: env_bool("USE_FAKE_AI"),
        }
    }
}
