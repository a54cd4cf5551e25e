use chrono::{NaiveDateTime, Utc};
use domain::AnomalyObserver;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Challenge {
    NoSqlReviews,
    ForgedReview,
}

impl Challenge {
    pub const ALL: [Challenge; 2] = [Challenge::NoSqlReviews, Challenge::ForgedReview];

    pub fn key(&self) -> &'static str {
        match self {
            Challenge::NoSqlReviews => "noSqlReviewsChallenge",
            Challenge::ForgedReview => "forgedReviewChallenge",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeStatus {
    pub key: &'static str,
    pub solved: bool,
    pub solved_at: Option<NaiveDateTime>,
}

/// 记录哪些挑战已被触发；只记第一次
#[derive(Clone, Default)]
pub struct ChallengeBoard {
    solved: Arc<Mutex<HashMap<Challenge, NaiveDateTime>>>,
}

impl ChallengeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Challenge, NaiveDateTime>> {
        self.solved.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn solve(&self, challenge: Challenge) {
        let mut map = self.lock();
        if !map.contains_key(&challenge) {
            map.insert(challenge, Utc::now().naive_utc());
            info!("Challenge solved: {}", challenge.key());
        }
    }

    pub fn is_solved(&self, challenge: Challenge) -> bool {
        self.lock().contains_key(&challenge)
    }

    pub fn statuses(&self) -> Vec<ChallengeStatus> {
        let map = self.lock();
        Challenge::ALL
            .iter()
            .map(|c| ChallengeStatus {
                key: c.key(),
                solved: map.contains_key(c),
                solved_at: map.get(c).copied(),
            })
            .collect()
    }
}

impl AnomalyObserver for ChallengeBoard {
    fn mass_update(&self) {
        self.solve(Challenge::NoSqlReviews);
    }

    fn forged_review(&self) {
        self.solve(Challenge::ForgedReview);
    }
}
