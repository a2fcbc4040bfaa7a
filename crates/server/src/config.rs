use models::validation::ValidationRules;

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub oidc_issuer_url: String,
    pub run_migrations: bool,
    pub rules: ValidationRules,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:3000";

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let mut rules = ValidationRules::default();
        if let Some(min) = Self::parse_var(&lookup, "SEMINAR_DURATION_MIN")? {
            rules.duration.min = min;
        }
        if let Some(max) = Self::parse_var(&lookup, "SEMINAR_DURATION_MAX")? {
            rules.duration.max = max;
        }
        if rules.duration.min > rules.duration.max {
            return Err(ConfigError::Invalid {
                name: "SEMINAR_DURATION_MIN",
                value: format!("{} exceeds maximum {}", rules.duration.min, rules.duration.max),
            });
        }

        let run_migrations = Self::parse_var(&lookup, "RUN_MIGRATIONS")?.unwrap_or(true);

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| Self::DEFAULT_BIND_ADDR.to_string()),
            oidc_issuer_url: required("OIDC_ISSUER_URL")?,
            run_migrations,
            rules,
        })
    }

    fn parse_var<T: std::str::FromStr>(
        lookup: &impl Fn(&str) -> Option<String>,
        name: &'static str,
    ) -> Result<Option<T>, ConfigError> {
        lookup(name)
            .map(|value| {
                let parsed = value.trim().parse();
                parsed.map_err(|_| ConfigError::Invalid { name, value })
            })
            .transpose()
    }
}
