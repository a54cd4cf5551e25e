use anyhow::Context;
use storage::Db;

const DEFAULT_DB_URL: &str = "sqlite://data/reviews.db";

// 用法: issue-session <email> [database_url]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let email = args
        .next()
        .context("Usage: issue-session <email> [database_url]")?;
    let db_url = args
        .next()
        .or_else(|| std::env::var("REVIEWS_DATABASE__URL").ok())
        .unwrap_or_else(|| DEFAULT_DB_URL.to_string());

    let db = Db::new(&db_url).await?;
    let token = db.create_session(&email).await?;

    println!("{}", token);
    Ok(())
}
