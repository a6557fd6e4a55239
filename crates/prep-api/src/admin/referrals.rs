use axum::{Json, Router, extract::State, routing::get};
use prep_console::analytics::ReferralSummary;

use super::model::RangeQuery;
use crate::{ApiState, auth::AdminSession, extract::ValidQuery};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/admin/referrals/summary", get(referral_summary))
}

async fn referral_summary(
    _session: AdminSession,
    State(state): State<ApiState>,
    ValidQuery(query): ValidQuery<RangeQuery>,
) -> Json<ReferralSummary> {
    Json(state.analytics.referral_summary(query.range.as_deref().unwrap_or_default()))
}
