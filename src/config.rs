use anyhow::Result;
use bigdecimal::{BigDecimal, Zero};
use std::env;
use std::str::FromStr;

/// Multipliers applied to timesheet segments. Illustrative defaults, not law.
#[derive(Debug, Clone, PartialEq)]
pub struct PayRates {
    pub regular: f64,
    pub overtime: f64,
    pub night_diff: f64,
}

impl Default for PayRates {
    fn default() -> Self {
        Self {
            regular: 1.0,
            overtime: 1.25,
            night_diff: 1.1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub client_base_url: String,
    pub default_deduction_cap_percent: BigDecimal,
    pub pay_rates: PayRates,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_env_only()
    }

    /// Load configuration from environment variables only (without loading .env files)
    /// This is useful for testing where you want to control the environment directly
    pub fn from_env_only() -> Result<Self> {
        let defaults = PayRates::default();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            client_base_url: env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            default_deduction_cap_percent: env::var("LOAN_DEDUCTION_CAP_PERCENT")
                .ok()
                .and_then(|v| BigDecimal::from_str(&v).ok())
                .filter(|cap| *cap > BigDecimal::zero() && *cap <= BigDecimal::from(100))
                .unwrap_or_else(|| BigDecimal::from(30)),
            pay_rates: PayRates {
                regular: rate_from_env("REGULAR_RATE_MULTIPLIER", defaults.regular),
                overtime: rate_from_env("OVERTIME_RATE_MULTIPLIER", defaults.overtime),
                night_diff: rate_from_env("NIGHT_DIFF_RATE_MULTIPLIER", defaults.night_diff),
            },
        })
    }

    pub fn test_config() -> Result<Self> {
        Ok(Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            client_base_url: "http://localhost:3000".to_string(),
            default_deduction_cap_percent: BigDecimal::from(30),
            pay_rates: PayRates::default(),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn rate_from_env(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| *v > 0.0)
        .unwrap_or(default)
}
