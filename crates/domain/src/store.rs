use async_trait::async_trait;

use crate::commands::MessageUpdate;
use crate::models::UpdateOutcome;

/// 评论存储的最小契约
///
/// 实现方必须遵守 `MessageUpdate::multi`：为 `false` 时最多修改一个文档，
/// 并按匹配顺序返回更新前的快照。
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn update_message(&self, update: MessageUpdate) -> anyhow::Result<UpdateOutcome>;
}
