use std::path::Path;

/// Deployment environment, taken from `APP_ENV`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Local,
    Development,
    Staging,
    Production,
    Testing,
    Custom(String),
}

impl Environment {
    /// Read `APP_ENV`; unset means `Local`
    pub fn detect() -> Self {
        Self::parse(std::env::var("APP_ENV").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Production,
            Some("staging") => Self::Staging,
            Some("development") => Self::Development,
            Some("testing") => Self::Testing,
            Some("local") | Some("") | None => Self::Local,
            Some(other) => Self::Custom(other.to_string()),
        }
    }

    /// Suffix of the environment-specific `.env` file
    pub fn env_file_suffix(&self) -> &str {
        match self {
            Self::Local => "local",
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
            Self::Testing => "testing",
            Self::Custom(name) => name,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Local | Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.env_file_suffix())
    }
}

/// Load `.env` files from `project_root`
///
/// Later entries lose to earlier ones, and real environment variables beat
/// every file:
///
/// 1. `.env.{environment}.local`
/// 2. `.env.{environment}`
/// 3. `.env.local`
/// 4. `.env`
pub fn load_dotenv(project_root: &Path) -> Environment {
    let environment = Environment::detect();
    let suffix = environment.env_file_suffix();

    // dotenvy never overwrites a variable that is already set, so the most
    // specific file goes first.
    let files = [
        format!(".env.{}.local", suffix),
        format!(".env.{}", suffix),
        ".env.local".to_string(),
        ".env".to_string(),
    ];
    for file in files {
        if dotenvy::from_path(project_root.join(&file)).is_ok() {
            tracing::debug!(file = %file, "loaded environment file");
        }
    }

    environment
}

/// Read and parse an environment variable, falling back to `default` when it
/// is unset or does not parse
pub fn env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_optional(key).unwrap_or(default)
}

/// Read and parse an environment variable
pub fn env_optional<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_environments() {
        assert_eq!(Environment::parse(Some("production")), Environment::Production);
        assert_eq!(Environment::parse(None), Environment::Local);
        assert_eq!(
            Environment::parse(Some("qa")),
            Environment::Custom("qa".to_string())
        );
        assert_eq!(Environment::parse(Some("qa")).env_file_suffix(), "qa");
    }

    #[test]
    fn env_falls_back_on_unparsable_values() {
        std::env::set_var("TASKBOARD_TEST_PORT", "not-a-port");
        assert_eq!(env("TASKBOARD_TEST_PORT", 8080u16), 8080);
        std::env::set_var("TASKBOARD_TEST_PORT", "9000");
        assert_eq!(env("TASKBOARD_TEST_PORT", 8080u16), 9000);
        std::env::remove_var("TASKBOARD_TEST_PORT");
    }
}
