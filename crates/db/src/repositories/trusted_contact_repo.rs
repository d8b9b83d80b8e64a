//! Repository for the `trusted_contacts` table.

use sqlx::PgPool;

use crate::models::trusted_contact::TrustedContact;

/// Column list for `trusted_contacts` queries.
const COLUMNS: &str = "id, owner_uid, contact_uid, relationship, created_at";

/// Approved trust links between a protected user and their contacts.
pub struct TrustedContactRepo;

impl TrustedContactRepo {
    /// Create the link, or refresh its relationship label if it exists.
    pub async fn link(
        pool: &PgPool,
        owner_uid: &str,
        contact_uid: &str,
        relationship: Option<&str>,
    ) -> Result<TrustedContact, sqlx::Error> {
        let query = format!(
            "INSERT INTO trusted_contacts (owner_uid, contact_uid, relationship) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (owner_uid, contact_uid) \
             DO UPDATE SET relationship = EXCLUDED.relationship \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrustedContact>(&query)
            .bind(owner_uid)
            .bind(contact_uid)
            .bind(relationship)
            .fetch_one(pool)
            .await
    }

    /// Remove a link. Returns `true` if it existed.
    pub async fn unlink(
        pool: &PgPool,
        owner_uid: &str,
        contact_uid: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM trusted_contacts WHERE owner_uid = $1 AND contact_uid = $2")
                .bind(owner_uid)
                .bind(contact_uid)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Push tokens of every registered device of every trusted contact of
    /// `owner_uid`, in link order then registration order.
    pub async fn tokens_for_trusted_contacts(
        pool: &PgPool,
        owner_uid: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT dt.token \
             FROM trusted_contacts tc \
             JOIN device_tokens dt ON dt.user_id = tc.contact_uid \
             WHERE tc.owner_uid = $1 \
             ORDER BY tc.id, dt.id",
        )
        .bind(owner_uid)
        .fetch_all(pool)
        .await
    }
}
