use chrono::NaiveDateTime;
use domain::{Review, ReviewId};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlReview {
    pub id: Vec<u8>,
    pub product: i64,
    pub author: String,
    pub message: String,
    pub likes_count: i64,
    pub created_at: NaiveDateTime,
}

impl TryFrom<SqlReview> for Review {
    type Error = anyhow::Error;

    fn try_from(sql: SqlReview) -> Result<Self, Self::Error> {
        let id = ReviewId::try_from(sql.id.as_slice())?;
        Ok(Review {
            id,
            product: sql.product,
            author: sql.author,
            message: sql.message,
            likes_count: sql.likes_count,
            created_at: sql.created_at,
        })
    }
}

#[derive(FromRow)]
pub struct SqlSession {
    pub email: String,
}
