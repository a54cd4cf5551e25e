mod commands;
mod error;
mod events;
mod models;
mod store;
mod updater;

pub use commands::{MessageUpdate, UpdateRequest, ValidatedUpdate};
pub use error::{ReviewIdError, UpdateError};
pub use events::{Anomalies, AnomalyObserver};
pub use models::{CallerIdentity, NewReview, Review, ReviewId, UpdateOutcome, REVIEW_ID_LEN};
pub use store::ReviewStore;
pub use updater::ReviewMessageUpdater;
