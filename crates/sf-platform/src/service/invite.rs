//! Invite Token Store
//!
//! Invite-by-INN tokens live in Redis as a set per tax identifier with a
//! 24-hour TTL. Consumption is a single `SREM`, so two concurrent joins
//! with the same token cannot both succeed.

use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::error::Result;
use crate::service::token::generate_opaque_token;

const INVITE_TTL_SECS: i64 = 86_400;

#[derive(Clone)]
pub struct InviteTokenStore {
    conn: ConnectionManager,
}

impl InviteTokenStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn key(inn: &str) -> String {
        format!("invite:{inn}")
    }

    /// Mints `count` fresh tokens. The TTL is reset on every mint, covering
    /// older unexpired tokens in the same set.
    pub async fn create(&self, inn: &str, count: usize) -> Result<Vec<String>> {
        let tokens: Vec<String> = (0..count).map(|_| generate_opaque_token()).collect();
        let key = Self::key(inn);
        let mut conn = self.conn.clone();
        let _: () = conn.sadd(&key, &tokens).await?;
        let _: () = conn.expire(&key, INVITE_TTL_SECS).await?;
        Ok(tokens)
    }

    pub async fn list(&self, inn: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.smembers(Self::key(inn)).await?)
    }

    /// Atomically removes `token` from the set; returns whether it was
    /// present. The caller treats `false` as an invalid token.
    pub async fn consume(&self, inn: &str, token: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.srem(Self::key(inn), token).await?;
        Ok(removed == 1)
    }
}
