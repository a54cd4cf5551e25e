use crate::{models::SqlSession, Db};
use chrono::Utc;
use domain::CallerIdentity;
use sha2::{Digest, Sha256};

fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

impl Db {
    // 签发会话，返回明文 token；库里只存哈希
    pub async fn create_session(&self, email: &str) -> anyhow::Result<String> {
        let token = hex::encode(rand::random::<[u8; 32]>());
        let now = Utc::now().naive_utc();

        sqlx::query("INSERT INTO sessions (token_hash, email, created_at) VALUES (?, ?, ?)")
            .bind(hash_token(&token))
            .bind(email)
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(token)
    }

    pub async fn find_session(&self, token: &str) -> anyhow::Result<Option<CallerIdentity>> {
        let row = sqlx::query_as::<_, SqlSession>("SELECT email FROM sessions WHERE token_hash = ?")
            .bind(hash_token(token))
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| CallerIdentity { email: r.email }))
    }
}

#[cfg(test)]
mod tests {
    use crate::Db;

    #[tokio::test]
    async fn test_session_roundtrip() {
        let db = Db::new("sqlite::memory:").await.unwrap();

        let token = db.create_session("b@y.com").await.unwrap();
        assert_eq!(token.len(), 64);

        let caller = db.find_session(&token).await.unwrap().unwrap();
        assert_eq!(caller.email, "b@y.com");

        assert!(db.find_session("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tokens_are_distinct() {
        let db = Db::new("sqlite::memory:").await.unwrap();
        let a = db.create_session("a@x.com").await.unwrap();
        let b = db.create_session("a@x.com").await.unwrap();
        assert_ne!(a, b);
    }
}
