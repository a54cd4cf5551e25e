use crate::challenges::{ChallengeBoard, ChallengeStatus};
use axum::{extract::State, Json};

pub async fn list_challenges(State(board): State<ChallengeBoard>) -> Json<Vec<ChallengeStatus>> {
    Json(board.statuses())
}
