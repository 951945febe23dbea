use chirp_sql::{Row, SQLError, Value};
use tracing::{debug, info};

use crate::model::{LoginRequest, LoginResponse, RegisterRequest, User};
use crate::service::{SocialError, SocialService};

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

// ── Password helpers ──

/// Hash a plain password with argon2id.
pub fn hash_password(password: &str) -> Result<String, SocialError> {
    use argon2::Argon2;
    use password_hash::rand_core::OsRng;
    use password_hash::{PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| SocialError::Internal(format!("password hash failed: {}", e)))
}

/// Verify a password against an argon2id hash. Unparseable hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::Argon2;
    use password_hash::{PasswordHash, PasswordVerifier};

    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

fn user_from_row(row: &Row) -> Result<User, SocialError> {
    Ok(User {
        id: row.require_i64("user_id")?,
        name: row.get_str("name").unwrap_or_default().to_string(),
        username: row.require_str("username")?,
        password_hash: row.require_str("password")?,
        gender: row.get_str("gender").unwrap_or_default().to_string(),
    })
}

impl SocialService {
    /// Register a new user.
    ///
    /// The duplicate check runs before the password-length check, so a taken
    /// username is reported even when the password is also too short.
    pub fn register(&self, input: RegisterRequest) -> Result<User, SocialError> {
        if self.get_user_by_username(&input.username)?.is_some() {
            return Err(SocialError::Validation("User already exists".into()));
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SocialError::Validation("Password is too short".into()));
        }

        let password_hash = hash_password(&input.password)?;
        let id = self
            .sql
            .insert(
                "INSERT INTO user (name, username, password, gender) VALUES (?1, ?2, ?3, ?4)",
                &[
                    Value::Text(input.name.clone()),
                    Value::Text(input.username.clone()),
                    Value::Text(password_hash.clone()),
                    Value::Text(input.gender.clone()),
                ],
            )
            .map_err(|e: SQLError| {
                // Lost a race with a concurrent registration of the same name.
                if e.is_constraint() {
                    SocialError::Validation("User already exists".into())
                } else {
                    e.into()
                }
            })?;

        info!(user_id = id, username = %input.username, "user registered");
        Ok(User {
            id,
            name: input.name,
            username: input.username,
            password_hash,
            gender: input.gender,
        })
    }

    /// Check credentials and issue a bearer token.
    pub fn login(&self, input: &LoginRequest) -> Result<LoginResponse, SocialError> {
        let user = self
            .get_user_by_username(&input.username)?
            .ok_or_else(|| SocialError::Validation("Invalid user".into()))?;

        if !verify_password(&input.password, &user.password_hash) {
            debug!(username = %input.username, "login rejected: bad password");
            return Err(SocialError::Validation("Invalid password".into()));
        }

        let jwt_token = self.issue_token(&user.username)?;
        Ok(LoginResponse { jwt_token })
    }

    /// Look up a user by username.
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>, SocialError> {
        let rows = self.sql.query(
            "SELECT user_id, name, username, password, gender FROM user WHERE username = ?1",
            &[Value::Text(username.to_string())],
        )?;
        rows.first().map(user_from_row).transpose()
    }

    /// Resolve the holder of a verified credential.
    ///
    /// A token naming a user that no longer exists is treated as invalid.
    pub fn current_user(&self, username: &str) -> Result<User, SocialError> {
        self.get_user_by_username(username)?
            .ok_or_else(|| SocialError::InvalidCredential(format!("unknown user '{}'", username)))
    }
}
