use crate::{models::SqlReview, Db};
use async_trait::async_trait;
use chrono::Utc;
use domain::{MessageUpdate, NewReview, Review, ReviewId, ReviewStore, UpdateOutcome};
use sqlx::SqliteConnection;
use tracing::warn;

const REVIEW_COLUMNS: &str = "id, product, author, message, likes_count, created_at";

impl Db {
    pub async fn create_review(&self, new: NewReview) -> anyhow::Result<Review> {
        let review = Review {
            id: ReviewId::generate(),
            product: new.product,
            author: new.author,
            message: new.message,
            likes_count: 0,
            created_at: Utc::now().naive_utc(),
        };

        sqlx::query(
            r#"
            INSERT INTO reviews (id, product, author, message, likes_count, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(review.id.as_bytes().to_vec())
        .bind(review.product)
        .bind(&review.author)
        .bind(&review.message)
        .bind(review.likes_count)
        .bind(review.created_at)
        .execute(&self.pool)
        .await?;

        Ok(review)
    }

    pub async fn get_review(&self, id: &ReviewId) -> anyhow::Result<Option<Review>> {
        let row = sqlx::query_as::<_, SqlReview>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?"
        ))
        .bind(id.as_bytes().to_vec())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Review::try_from).transpose()
    }

    pub async fn list_reviews(&self, product: i64) -> anyhow::Result<Vec<Review>> {
        let rows = sqlx::query_as::<_, SqlReview>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE product = ? ORDER BY created_at ASC, id ASC"
        ))
        .bind(product)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Review::try_from).collect()
    }
}

// 调用方须已持有写锁；返回修改数与更新前的行
async fn apply_message_update(
    conn: &mut SqliteConnection,
    update: &MessageUpdate,
) -> anyhow::Result<UpdateOutcome> {
    let limit: i64 = if update.multi { -1 } else { 1 };

    let matched = sqlx::query_as::<_, SqlReview>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ? ORDER BY rowid LIMIT ?"
    ))
    .bind(update.id.as_bytes().to_vec())
    .bind(limit)
    .fetch_all(&mut *conn)
    .await?;

    let mut modified = 0;
    for row in &matched {
        let result = sqlx::query("UPDATE reviews SET message = ? WHERE id = ?")
            .bind(&update.message)
            .bind(&row.id)
            .execute(&mut *conn)
            .await?;
        modified += result.rows_affected();
    }

    let original = matched
        .into_iter()
        .map(Review::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(UpdateOutcome { modified, original })
}

#[async_trait]
impl ReviewStore for Db {
    async fn update_message(&self, update: MessageUpdate) -> anyhow::Result<UpdateOutcome> {
        let mut conn = self.pool.acquire().await?;

        // 先拿写锁再取快照：延迟事务从读锁升级为写锁时会直接返回 SQLITE_BUSY，不走 busy_timeout
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

        let result = match apply_message_update(&mut conn, &update).await {
            Ok(outcome) => sqlx::query("COMMIT")
                .execute(&mut *conn)
                .await
                .map(|_| outcome)
                .map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };

        if result.is_err() {
            if let Err(e) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
                // 事务状态未知的连接不能放回池里
                warn!("Rollback failed, discarding connection: {}", e);
                drop(conn.detach());
            }
        }

        result
    }
}
