use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use rand::Rng;
use uuid::Uuid;

const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

static SETTINGS: OnceCell<JwtSettings> = OnceCell::new();

struct JwtSettings {
    secret: String,
    lifetime_hours: i64,
}

/// Identity a session token is issued for
pub struct SessionSubject<'a> {
    pub user_id: Uuid,
    pub username: &'a str,
    pub display_name: &'a str,
    pub is_admin: bool,
    pub stores: &'a [Uuid],
}

/// Set the signing secret and token lifetime (once, at startup).
/// Without a configured secret a random one is generated, which
/// invalidates every session on restart.
pub fn configure(secret: Option<String>, lifetime_hours: i64) -> Result<()> {
    let secret = match secret.filter(|s| !s.trim().is_empty()) {
        Some(secret) => secret,
        None => {
            tracing::warn!("No jwt_secret configured, sessions will not survive a restart");
            generate_jwt_secret()
        }
    };
    SETTINGS
        .set(JwtSettings {
            secret,
            lifetime_hours: lifetime_hours.max(1),
        })
        .map_err(|_| anyhow::anyhow!("JWT settings already configured"))
}

fn settings() -> &'static JwtSettings {
    SETTINGS.get_or_init(|| JwtSettings {
        secret: generate_jwt_secret(),
        lifetime_hours: DEFAULT_TOKEN_LIFETIME_HOURS,
    })
}

/// Generate a signed access token carrying the session
pub fn generate_access_token(subject: &SessionSubject<'_>) -> Result<String> {
    let settings = settings();
    let now = Utc::now();
    let exp = (now + chrono::Duration::hours(settings.lifetime_hours)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = TokenClaims {
        sub: subject.user_id.to_string(),
        username: subject.username.to_string(),
        display_name: subject.display_name.to_string(),
        is_admin: subject.is_admin,
        stores: subject.stores.to_vec(),
        jti: Uuid::new_v4().to_string(),
        exp,
        iat,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

/// Validate JWT token and extract claims
pub fn validate_token(token: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(settings().secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

/// Generate a cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}
