use cardapply_core::eligibility::{EligibilityPolicy, DEFAULT_MIN_MONTHLY_SALARY};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Inclusive monthly salary floor enforced on submission (default: `10000`).
    pub min_monthly_salary: f64,
    /// Default number of rows returned by the listing endpoint (default: `10`).
    pub list_limit: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `3000`                  |
    /// | `CORS_ORIGINS`           | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `MIN_MONTHLY_SALARY`     | `10000`                 |
    /// | `APPLICATION_LIST_LIMIT` | `10`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let min_monthly_salary: f64 = std::env::var("MIN_MONTHLY_SALARY")
            .ok()
            .map(|v| v.parse().expect("MIN_MONTHLY_SALARY must be a number"))
            .unwrap_or(DEFAULT_MIN_MONTHLY_SALARY);

        let list_limit: i64 = std::env::var("APPLICATION_LIST_LIMIT")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("APPLICATION_LIST_LIMIT must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            min_monthly_salary,
            list_limit,
        }
    }

    /// The eligibility policy applied to incoming submissions.
    pub fn eligibility_policy(&self) -> EligibilityPolicy {
        EligibilityPolicy::new(self.min_monthly_salary)
    }
}
