//! Server Configuration
//!
//! Read once at startup from the environment (after `.env`).

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use axum::http::HeaderValue;
use booking::{AvailabilityPolicy, BookingConfig, CatwayDeletionPolicy};
use identity::IdentityConfig;
use platform::password::PasswordPolicy;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Everything the binary needs to start
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL URL; `None` runs on in-memory stores
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<HeaderValue>,
    pub identity: IdentityConfig,
    pub booking: BookingConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let storage_timeout = match env::var("STORAGE_TIMEOUT_MS") {
            Ok(ms) => Duration::from_millis(ms.parse().context("STORAGE_TIMEOUT_MS")?),
            Err(_) => BookingConfig::default().storage_timeout,
        };

        let mut identity = identity_base()?;
        identity.storage_timeout = storage_timeout;
        if let Ok(secs) = env::var("TOKEN_TTL_SECS") {
            identity.token_ttl = Duration::from_secs(secs.parse().context("TOKEN_TTL_SECS")?);
        }
        identity.password_policy = parse_or_default("PASSWORD_POLICY")?;

        let booking = BookingConfig {
            availability: parse_or_default("AVAILABILITY_POLICY")?,
            deletion: parse_or_default("CATWAY_DELETION_POLICY")?,
            storage_timeout,
        };

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR")?;

        let frontend_origins = parse_origins(
            &env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string()),
        )?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            bind_addr,
            frontend_origins,
            identity,
            booking,
        })
    }
}

/// Token secret from `TOKEN_SECRET` (base64, 32 bytes)
///
/// Debug builds fall back to a random secret; release builds refuse to start without one.
fn identity_base() -> anyhow::Result<IdentityConfig> {
    let Ok(secret_b64) = env::var("TOKEN_SECRET") else {
        if cfg!(debug_assertions) {
            tracing::warn!("TOKEN_SECRET not set, using a random development secret");
            return Ok(IdentityConfig::development());
        }
        bail!("TOKEN_SECRET must be set in production");
    };

    let bytes = platform::crypto::from_base64(secret_b64.trim()).context("TOKEN_SECRET")?;
    let token_secret: [u8; 32] = bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("TOKEN_SECRET must be 32 bytes, got {}", b.len()))?;

    let base = if cfg!(debug_assertions) {
        IdentityConfig::development()
    } else {
        IdentityConfig::default()
    };

    Ok(IdentityConfig {
        token_secret,
        ..base
    })
}

/// Comma-separated CORS origins; any unusable entry aborts startup
fn parse_origins(raw: &str) -> anyhow::Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("FRONTEND_ORIGINS: invalid origin {origin:?}"))
        })
        .collect()
}

fn parse_or_default<T>(key: &str) -> anyhow::Result<T>
where
    T: FromStr + Default,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw.parse().with_context(|| key.to_string()),
        Err(_) => Ok(T::default()),
    }
}
