//! Repository for the `device_tokens` table.

use callguard_core::device::DeviceRegistration;
use sqlx::PgPool;

use crate::models::device_token::DeviceToken;

/// Column list for `device_tokens` queries.
const COLUMNS: &str =
    "id, user_id, device_id, token, platform, app_version, last_updated, created_at";

/// Constraint guarding global token uniqueness.
const TOKEN_CONSTRAINT: &str = "uq_device_tokens_token";

fn is_token_collision(err: &sqlx::Error) -> bool {
    err.as_database_error().is_some_and(|e| {
        e.code().as_deref() == Some("23505") && e.constraint() == Some(TOKEN_CONSTRAINT)
    })
}

/// Push-token registrations, one per `(user_id, device_id)`.
pub struct DeviceTokenRepo;

impl DeviceTokenRepo {
    /// Insert or refresh the registration for `(user_id, device_id)`.
    ///
    /// A token belongs to exactly one installation. If the same token is
    /// currently stored under a different `(user_id, device_id)` (the app was
    /// reinstalled or the account switched), that row is removed first. The
    /// delete and the upsert run in one transaction.
    ///
    /// Concurrent registrations of the same `(user_id, device_id)` converge
    /// through `ON CONFLICT`. Concurrent registrations of the same token under
    /// different devices can still collide on `uq_device_tokens_token`; the
    /// loser retries once, which removes the winner's row and takes over.
    pub async fn register(
        pool: &PgPool,
        user_id: &str,
        input: &DeviceRegistration,
        last_updated_ms: i64,
    ) -> Result<DeviceToken, sqlx::Error> {
        match Self::register_once(pool, user_id, input, last_updated_ms).await {
            Err(e) if is_token_collision(&e) => {
                tracing::debug!(
                    user_id,
                    device_id = %input.device_id,
                    "Token claimed concurrently, retrying registration"
                );
                Self::register_once(pool, user_id, input, last_updated_ms).await
            }
            other => other,
        }
    }

    async fn register_once(
        pool: &PgPool,
        user_id: &str,
        input: &DeviceRegistration,
        last_updated_ms: i64,
    ) -> Result<DeviceToken, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM device_tokens \
             WHERE token = $1 AND NOT (user_id = $2 AND device_id = $3)",
        )
        .bind(&input.token)
        .bind(user_id)
        .bind(&input.device_id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO device_tokens \
                (user_id, device_id, token, platform, app_version, last_updated) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id, device_id) \
             DO UPDATE SET token = EXCLUDED.token, \
                           platform = EXCLUDED.platform, \
                           app_version = EXCLUDED.app_version, \
                           last_updated = EXCLUDED.last_updated \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DeviceToken>(&query)
            .bind(user_id)
            .bind(&input.device_id)
            .bind(&input.token)
            .bind(input.platform.as_str())
            .bind(&input.app_version)
            .bind(last_updated_ms)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// All registrations of a user, oldest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<DeviceToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM device_tokens WHERE user_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, DeviceToken>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a registration by token value.
    ///
    /// Returns the number of rows removed; zero is not an error.
    pub async fn delete_by_token(pool: &PgPool, token: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM device_tokens WHERE token = $1")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete a user's registration for one device.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete_for_device(
        pool: &PgPool,
        user_id: &str,
        device_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM device_tokens WHERE user_id = $1 AND device_id = $2")
                .bind(user_id)
                .bind(device_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
