use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::PinCode;

/// Store a pin-code mapping. An existing code is overwritten, matching
/// the share-link semantics of "the latest mint wins".
pub async fn upsert_pincode(
    pool: &PgPool,
    code: &str,
    address: &str,
    expires_at: DateTime<Utc>,
) -> anyhow::Result<PinCode> {
    let pin = sqlx::query_as::<_, PinCode>(
        r#"
        INSERT INTO pincodes (code, address, expires_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (code) DO UPDATE
            SET address = $2, expires_at = $3
        RETURNING *
        "#,
    )
    .bind(code)
    .bind(address)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(pin)
}

/// Look up a pin code. Expiry is the caller's concern.
pub async fn get_pincode(pool: &PgPool, code: &str) -> anyhow::Result<Option<PinCode>> {
    let pin = sqlx::query_as::<_, PinCode>("SELECT * FROM pincodes WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await?;

    Ok(pin)
}

/// Drop a pin code (used when a lookup finds it expired).
pub async fn delete_pincode(pool: &PgPool, code: &str) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM pincodes WHERE code = $1")
        .bind(code)
        .execute(pool)
        .await?;

    Ok(())
}
