use axum::extract::FromRef;
use storage::Db;

use crate::challenges::ChallengeBoard;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub challenges: ChallengeBoard,
}

impl FromRef<AppState> for Db {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for ChallengeBoard {
    fn from_ref(state: &AppState) -> Self {
        state.challenges.clone()
    }
}
