use anyhow::Result;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use once_cell::sync::OnceCell;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Length of credentials generated by password recovery
const GENERATED_PASSWORD_LENGTH: usize = 10;

/// Hash a password with argon2 and a random salt (PHC string format)
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Check a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("Stored password hash is malformed: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Hash checked when there is no account to check against
static DUMMY_HASH: OnceCell<String> = OnceCell::new();

/// Check a password against a stored hash, or against a throwaway hash when
/// there is none, so a missing account costs the same argon2 work.
/// A malformed stored hash never verifies.
pub fn verify_or_dummy(password: &str, hash: Option<&str>) -> bool {
    match hash {
        Some(hash) => verify_password(password, hash).unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            false
        }),
        None => {
            if let Ok(dummy) = DUMMY_HASH.get_or_try_init(|| hash_password("club-dummy-password")) {
                let _ = verify_password(password, dummy);
            }
            false
        }
    }
}

/// Random alphanumeric credential sent to users who lost their password
pub fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("x").unwrap();
        assert_ne!(hash, "x");
        assert!(verify_password("x", &hash).unwrap());
        assert!(!verify_password("y", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        assert_ne!(hash_password("secret").unwrap(), hash_password("secret").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("x", "plain-text").is_err());
    }

    #[test]
    fn test_verify_or_dummy() {
        let hash = hash_password("x").unwrap();
        assert!(verify_or_dummy("x", Some(&hash)));
        assert!(!verify_or_dummy("y", Some(&hash)));
        assert!(!verify_or_dummy("x", Some("plain-text")));

        assert!(!verify_or_dummy("club-dummy-password", None));
        let dummy = DUMMY_HASH.get().expect("dummy hash built on first miss");
        assert!(verify_password("club-dummy-password", dummy).unwrap());
    }

    #[test]
    fn test_generated_passwords() {
        let first = generate_password();
        assert_eq!(first.len(), GENERATED_PASSWORD_LENGTH);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(first, generate_password());
    }
}
