// file: src/database/session.rs
use anyhow::{Context, Result};
use log::{debug, warn};
use sqlx::{Row, SqlitePool};

use crate::models::{Session, SessionUser};

const CURRENT_USER: &str = "currentUser";
const IS_AUTHENTICATED: &str = "isAuthenticated";

async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let row = sqlx::query("SELECT value FROM session WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Failed to read session key '{}'", key))?;

    Ok(row.map(|r| r.get::<String, _>("value")))
}

/// Missing or unreadable entries yield an anonymous session.
pub async fn load(pool: &SqlitePool) -> Result<Session> {
    let authenticated = get_value(pool, IS_AUTHENTICATED).await?.as_deref() == Some("true");

    let user = match get_value(pool, CURRENT_USER).await? {
        Some(json) => match serde_json::from_str::<SessionUser>(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Stored session user is unreadable, ignoring it: {}", e);
                None
            }
        },
        None => None,
    };

    debug!(
        "Session loaded (authenticated: {}, user present: {})",
        authenticated,
        user.is_some()
    );
    Ok(Session {
        authenticated: authenticated && user.is_some(),
        user,
    })
}

pub async fn save(pool: &SqlitePool, session: &Session) -> Result<()> {
    let mut tx = pool.begin().await?;

    match &session.user {
        Some(user) => {
            let json = serde_json::to_string(user).context("Failed to encode session user")?;
            sqlx::query(
                "INSERT INTO session (key, value) VALUES (?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )
            .bind(CURRENT_USER)
            .bind(json)
            .execute(&mut *tx)
            .await?;
        }
        None => {
            sqlx::query("DELETE FROM session WHERE key = ?")
                .bind(CURRENT_USER)
                .execute(&mut *tx)
                .await?;
        }
    }

    sqlx::query(
        "INSERT INTO session (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(IS_AUTHENTICATED)
    .bind(session.authenticated.to_string())
    .execute(&mut *tx)
    .await?;

    tx.commit().await.context("Failed to save session")?;
    Ok(())
}

/// Sign-out: both keys removed.
pub async fn clear(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM session WHERE key IN (?, ?)")
        .bind(CURRENT_USER)
        .bind(IS_AUTHENTICATED)
        .execute(pool)
        .await
        .context("Failed to clear session")?;
    Ok(())
}
