use tracing::{debug, error, warn};

use crate::commands::{MessageUpdate, UpdateRequest, ValidatedUpdate};
use crate::error::UpdateError;
use crate::events::{Anomalies, AnomalyObserver};
use crate::models::{CallerIdentity, UpdateOutcome};
use crate::store::ReviewStore;

/// 更新单条评论的 message 字段：校验 -> 清洗 -> 更新 -> 归类
pub struct ReviewMessageUpdater<'a, S: ?Sized, O: ?Sized> {
    store: &'a S,
    observer: &'a O,
}

impl<'a, S, O> ReviewMessageUpdater<'a, S, O>
where
    S: ReviewStore + ?Sized,
    O: AnomalyObserver + ?Sized,
{
    pub fn new(store: &'a S, observer: &'a O) -> Self {
        Self { store, observer }
    }

    pub async fn update(
        &self,
        request: UpdateRequest,
        caller: Option<&CallerIdentity>,
    ) -> Result<UpdateOutcome, UpdateError> {
        let ValidatedUpdate { id, message } = ValidatedUpdate::try_from(request).map_err(|e| {
            debug!("Rejected review update: {}", e);
            e
        })?;

        let outcome = self
            .store
            .update_message(MessageUpdate::single(id, message))
            .await
            .map_err(|e| {
                error!("Review update failed for {}: {:?}", id, e);
                e
            })?;

        let anomalies = Anomalies::classify(&outcome, caller);
        if anomalies.mass_update {
            warn!("Review update on {} modified {} documents", id, outcome.modified);
        }
        if anomalies.forged_review {
            warn!(
                "Review {} updated by {} on behalf of another author",
                id,
                caller.map(|c| c.email.as_str()).unwrap_or_default()
            );
        }
        anomalies.report(self.observer);

        Ok(outcome)
    }
}
