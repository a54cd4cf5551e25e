use serde::Deserialize;
use serde_json::Value;

use crate::error::ReviewIdError;
use crate::models::ReviewId;

/// 原始请求体，字段类型不可信
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub message: Value,
}

/// 在边界处一次性校验/归一化后的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpdate {
    pub id: ReviewId,
    pub message: String,
}

impl TryFrom<UpdateRequest> for ValidatedUpdate {
    type Error = ReviewIdError;

    fn try_from(req: UpdateRequest) -> Result<Self, Self::Error> {
        let id = ReviewId::try_from(&req.id)?;
        let message = match req.message {
            Value::String(s) => s,
            _ => String::new(),
        };
        Ok(Self { id, message })
    }
}

/// 发往存储层的单文档更新指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageUpdate {
    pub id: ReviewId,
    pub message: String,
    pub multi: bool,
}

impl MessageUpdate {
    pub fn single(id: ReviewId, message: String) -> Self {
        Self {
            id,
            message,
            multi: false,
        }
    }
}
