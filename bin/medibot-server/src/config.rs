//! Server configuration, loaded from environment variables at startup.

const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;
const MAX_SESSION_TTL_SECS: i64 = 365 * DEFAULT_SESSION_TTL_SECS;

/// Runtime configuration for medibot-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:5000"`).
    pub bind_address: String,

    /// SQLite database URL (default: `"sqlite://medibot.db"`).
    /// Use `"sqlite::memory:"` for a throwaway database.
    pub database_url: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Directory for daily-rolling log files. Console only when unset.
    pub log_dir: Option<String>,

    /// When `true`, the trace middleware logs small JSON request/response bodies.
    pub log_bodies: bool,

    /// Comma-separated list of allowed CORS origins; any origin when unset.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI at `/swagger-ui`.
    pub enable_swagger: bool,

    /// Directory holding the chat front-end's static files.
    pub static_dir: Option<String>,

    /// Mark the session cookie `Secure` (HTTPS deployments).
    pub cookie_secure: bool,

    /// Persist every `/get_response` exchange to the chat log.
    pub chat_log_enabled: bool,

    /// Lifetime of a login session in seconds (default: one day).
    pub session_ttl_secs: i64,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("MEDIBOT_BIND", "0.0.0.0:5000"),
            database_url: env_or("MEDIBOT_DATABASE_URL", "sqlite://medibot.db"),
            log_level: env_or("MEDIBOT_LOG", "info"),
            log_json: env_flag("MEDIBOT_LOG_JSON", false),
            log_dir: env_opt("MEDIBOT_LOG_DIR"),
            log_bodies: env_flag("MEDIBOT_LOG_BODIES", false),
            cors_allowed_origins: env_opt("MEDIBOT_CORS_ORIGINS"),
            enable_swagger: env_flag("MEDIBOT_ENABLE_SWAGGER", true),
            static_dir: env_opt("MEDIBOT_STATIC_DIR"),
            cookie_secure: env_flag("MEDIBOT_COOKIE_SECURE", false),
            chat_log_enabled: env_flag("MEDIBOT_CHAT_LOG", true),
            session_ttl_secs: env_parse("MEDIBOT_SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)
                .clamp(1, MAX_SESSION_TTL_SECS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_owned(),
            database_url: "sqlite://medibot.db".to_owned(),
            log_level: "info".to_owned(),
            log_json: false,
            log_dir: None,
            log_bodies: false,
            cors_allowed_origins: None,
            enable_swagger: true,
            static_dir: None,
            cookie_secure: false,
            chat_log_enabled: true,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| parse_flag(&v).unwrap_or(default))
        .unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
