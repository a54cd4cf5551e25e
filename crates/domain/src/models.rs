use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use crate::error::ReviewIdError;

pub const REVIEW_ID_LEN: usize = 12;

/// 12 字节代理键，对外以 24 位十六进制字符串表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewId([u8; REVIEW_ID_LEN]);

impl ReviewId {
    /// 布局：4 字节时间戳 (秒, 大端) + 5 字节随机 + 3 字节计数器
    pub fn generate() -> Self {
        static COUNTER: OnceLock<AtomicU32> = OnceLock::new();
        let counter = COUNTER.get_or_init(|| AtomicU32::new(rand::random::<u32>() & 0x00ff_ffff));
        let seq = counter.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;

        let secs = Utc::now().timestamp() as u32;
        let random: [u8; 5] = rand::random();

        let mut bytes = [0u8; REVIEW_ID_LEN];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&random);
        bytes[9..].copy_from_slice(&seq.to_be_bytes()[1..]);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; REVIEW_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; REVIEW_ID_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for ReviewId {
    type Err = ReviewIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != REVIEW_ID_LEN * 2 {
            return Err(ReviewIdError::WrongLength(s.len()));
        }
        let mut bytes = [0u8; REVIEW_ID_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ReviewIdError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl TryFrom<&[u8]> for ReviewId {
    type Error = ReviewIdError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; REVIEW_ID_LEN] = value
            .try_into()
            .map_err(|_| ReviewIdError::WrongLength(value.len()))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<&serde_json::Value> for ReviewId {
    type Error = ReviewIdError;

    // 只接受字符串；对象/数组一律拒绝，绝不把结构化输入带进查询条件
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::String(s) => s.parse(),
            _ => Err(ReviewIdError::NotText),
        }
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for ReviewId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ReviewId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ReviewId,
    pub product: i64,
    pub author: String,
    pub message: String,
    pub likes_count: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub product: i64,
    pub author: String,
    pub message: String,
}

/// 会话层解析出的调用者身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub email: String,
}

impl CallerIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// 存储层返回的更新结果：修改数 + 更新前的快照
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub modified: u64,
    pub original: Vec<Review>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_hex_id() {
        let id: ReviewId = "5f1b2c3d4e5f60718293a4b5".parse().unwrap();
        assert_eq!(id.to_hex(), "5f1b2c3d4e5f60718293a4b5");

        let upper: ReviewId = "5F1B2C3D4E5F60718293A4B5".parse().unwrap();
        assert_eq!(upper, id);
    }

    #[test]
    fn test_reject_malformed_ids() {
        assert_eq!(
            "not-an-id".parse::<ReviewId>(),
            Err(ReviewIdError::WrongLength(9))
        );
        assert_eq!(
            "zz1b2c3d4e5f60718293a4b5".parse::<ReviewId>(),
            Err(ReviewIdError::InvalidHex)
        );
        assert_eq!(
            "5f1b2c3d4e5f60718293a4b5ff".parse::<ReviewId>(),
            Err(ReviewIdError::WrongLength(26))
        );
        assert!("".parse::<ReviewId>().is_err());
    }

    #[test]
    fn test_reject_structured_values() {
        for value in [
            json!(null),
            json!(42),
            json!(true),
            json!({ "$ne": -1 }),
            json!(["5f1b2c3d4e5f60718293a4b5"]),
        ] {
            assert_eq!(
                ReviewId::try_from(&value),
                Err(ReviewIdError::NotText),
                "accepted {value}"
            );
        }
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ReviewId::generate();
        let b = ReviewId::generate();
        assert_ne!(a, b);
        assert_eq!(a.to_hex().len(), 24);
        assert_eq!(a.to_hex().parse::<ReviewId>().unwrap(), a);
    }

    #[test]
    fn test_review_serializes_document_shape() {
        let review = Review {
            id: "5f1b2c3d4e5f60718293a4b5".parse().unwrap(),
            product: 1,
            author: "a@x.com".into(),
            message: "hi".into(),
            likes_count: 0,
            created_at: Utc::now().naive_utc(),
        };
        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(value["_id"], "5f1b2c3d4e5f60718293a4b5");
        assert_eq!(value["author"], "a@x.com");
        assert_eq!(value["likesCount"], 0);
    }
}
