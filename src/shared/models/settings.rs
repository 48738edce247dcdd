use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

const SETTINGS_FILENAME: &str = "settings.json";

/// Process-wide settings. Built once at boot, read-only afterwards.
///
/// Sources, later ones win: defaults, `settings.json` in the working
/// directory, environment variables named after the fields
/// (`DATABASE_URL`, `RATE_LIMIT_REQUESTS`, ...; case-insensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path of the redb file.
    pub database_url: String,
    pub tcp_socket_binding: String,
    pub tcp_socket_port: u16,

    // Auth, reserved until credentials are implemented
    pub jwt_secret_key: String,
    pub jwt_algorithm: String,
    pub jwt_access_token_expire_minutes: i64,
    pub jwt_refresh_token_expire_days: i64,

    pub email_enabled: bool,
    pub email_from: String,

    pub rate_limit_enabled: bool,
    pub rate_limit_requests: u32,
    /// Seconds.
    pub rate_limit_period: u64,

    pub app_title: String,
    pub app_description: String,
    pub app_version: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "toado.redb".to_string(),
            tcp_socket_binding: "0.0.0.0".to_string(),
            tcp_socket_port: 8000,
            jwt_secret_key: "your-secret-key-change-in-production".to_string(),
            jwt_algorithm: "HS256".to_string(),
            jwt_access_token_expire_minutes: 30,
            jwt_refresh_token_expire_days: 7,
            email_enabled: false,
            email_from: "noreply@toado.app".to_string(),
            rate_limit_enabled: false,
            rate_limit_requests: 100,
            rate_limit_period: 60,
            app_title: "Toado API".to_string(),
            app_description: "A todo management backend with a playful toad theme".to_string(),
            app_version: "1.0.0".to_string(),
        }
    }
}

impl Settings {
    const ENV_KEYS: &'static [&'static str] = &[
        "database_url",
        "tcp_socket_binding",
        "tcp_socket_port",
        "jwt_secret_key",
        "jwt_algorithm",
        "jwt_access_token_expire_minutes",
        "jwt_refresh_token_expire_days",
        "email_enabled",
        "email_from",
        "rate_limit_enabled",
        "rate_limit_requests",
        "rate_limit_period",
        "app_title",
        "app_description",
        "app_version",
    ];

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Json::file(SETTINGS_FILENAME))
            .merge(Env::raw().only(Self::ENV_KEYS))
    }

    pub fn load() -> Result<Settings, figment::Error> {
        Self::figment().extract()
    }

    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.tcp_socket_binding, self.tcp_socket_port)
    }
}
