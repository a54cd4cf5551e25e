use crate::models::{CallerIdentity, UpdateOutcome};

/// 异常观察者：每种异常一个方法，发出即忘，不影响响应
pub trait AnomalyObserver: Send + Sync {
    /// 一次调用修改了多于一个文档
    fn mass_update(&self);
    /// 修改了他人撰写的评论
    fn forged_review(&self);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anomalies {
    pub mass_update: bool,
    pub forged_review: bool,
}

impl Anomalies {
    pub fn classify(outcome: &UpdateOutcome, caller: Option<&CallerIdentity>) -> Self {
        let mass_update = outcome.modified > 1;
        let forged_review = match (caller, outcome.original.first()) {
            (Some(caller), Some(original)) => {
                original.author != caller.email && outcome.modified == 1
            }
            _ => false,
        };
        Self {
            mass_update,
            forged_review,
        }
    }

    pub fn report<O: AnomalyObserver + ?Sized>(&self, observer: &O) {
        if self.mass_update {
            observer.mass_update();
        }
        if self.forged_review {
            observer.forged_review();
        }
    }
}
