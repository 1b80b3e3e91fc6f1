use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    models::{
        auth::Claims,
        user::{LoginResponse, RegisterRequest, User, UserProfile, UserRole},
    },
    services::errors::{ServiceError, ServiceResult},
};

pub struct AuthService;

impl AuthService {
    /// Create an account. Email is unique; the role defaults to student.
    pub async fn register(pool: &PgPool, req: &RegisterRequest) -> ServiceResult<UserProfile> {
        let hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)
            .map_err(anyhow::Error::from)?;
        let role = req.role.unwrap_or(UserRole::Student);

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(hash)
        .bind(role.to_string())
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => ServiceError::Validation(
                "An account with this email already exists".to_string(),
            ),
            _ => ServiceError::Database(e),
        })?;
        Ok(user.into())
    }

    /// Validate credentials and issue an access token.
    pub async fn login(
        pool: &PgPool,
        email: &str,
        password: &str,
        jwt_secret: &str,
        access_ttl: u64,
    ) -> ServiceResult<LoginResponse> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND is_active = TRUE",
        )
        .bind(email)
        .fetch_optional(pool)
        .await?
        .ok_or(ServiceError::Unauthorized("Invalid credentials"))?;

        let valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|_| ServiceError::Unauthorized("Invalid credentials"))?;
        if !valid {
            return Err(ServiceError::Unauthorized("Invalid credentials"));
        }

        let role: UserRole = user.role.parse().unwrap_or(UserRole::Student);
        let token = Self::generate_access_token(user.id, role, jwt_secret, access_ttl)?;

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn profile(pool: &PgPool, user_id: Uuid) -> ServiceResult<UserProfile> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ServiceError::NotFound("User not found"))?;
        Ok(user.into())
    }

    pub fn generate_access_token(
        user_id: Uuid,
        role: UserRole,
        jwt_secret: &str,
        access_ttl: u64,
    ) -> ServiceResult<String> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            exp: now + access_ttl as usize,
            iat: now,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(jwt_secret.as_bytes()),
        )
        .map_err(anyhow::Error::from)?;
        Ok(token)
    }
}
