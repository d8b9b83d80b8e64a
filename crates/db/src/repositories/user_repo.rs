//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::User;

/// Column list for `users` queries.
const COLUMNS: &str = "uid, display_name, phone_number, created_at, updated_at";

/// Profiles keyed by the identity provider's user id.
pub struct UserRepo;

impl UserRepo {
    /// Create the profile or overwrite its name and phone number.
    pub async fn upsert_profile(
        pool: &PgPool,
        uid: &str,
        display_name: Option<&str>,
        phone_number: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (uid, display_name, phone_number) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (uid) \
             DO UPDATE SET display_name = EXCLUDED.display_name, \
                           phone_number = EXCLUDED.phone_number, \
                           updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(uid)
            .bind(display_name)
            .bind(phone_number)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_uid(pool: &PgPool, uid: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE uid = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(uid)
            .fetch_optional(pool)
            .await
    }

    /// The user's display name; `None` if there is no profile or no name.
    pub async fn find_display_name(pool: &PgPool, uid: &str) -> Result<Option<String>, sqlx::Error> {
        let name: Option<Option<String>> =
            sqlx::query_scalar("SELECT display_name FROM users WHERE uid = $1")
                .bind(uid)
                .fetch_optional(pool)
                .await?;
        Ok(name.flatten().filter(|n| !n.trim().is_empty()))
    }
}
