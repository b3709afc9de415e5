use serde::{Deserialize, Serialize};

use crate::store::{ApplicationStore, StoreError};

const NEAR_CAPACITY_PERCENTAGE: i64 = 80;

/// How full the current cohort is, counting founders and investors together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortStats {
    pub founders: i64,
    pub investors: i64,
    pub total: i64,
    pub target: i64,
    pub fill_percentage: i64,
    pub is_near_capacity: bool,
    pub is_full: bool,
}

impl CohortStats {
    pub fn from_counts(founders: i64, investors: i64, target: i64) -> Self {
        let total = founders + investors;
        let is_full = total >= target;
        let fill_percentage = if target <= 0 {
            100
        } else {
            // rounds half up without going through floats
            ((total * 200 + target) / (target * 2)).min(100)
        };

        Self {
            founders,
            investors,
            total,
            target,
            fill_percentage,
            is_near_capacity: !is_full && fill_percentage >= NEAR_CAPACITY_PERCENTAGE,
            is_full,
        }
    }
}

#[tracing::instrument(name = "Computing cohort stats", skip(store))]
pub async fn get_cohort_stats(
    store: &dyn ApplicationStore,
    target: i64,
) -> Result<CohortStats, StoreError> {
    let founders = store.count_founder_applications().await?;
    let investors = store.count_investor_applications().await?;

    Ok(CohortStats::from_counts(founders, investors, target))
}
