use contracts::domain::a003_agent_application::aggregate::{AgentApplication, ReviewDecision};
use gloo_net::http::Request;
use std::sync::Arc;

use crate::shared::api_utils::{api_url, auth_header, ensure_ok, ApiError};
use crate::shared::remote_table::{ItemsDataSource, RestResource};

const RESOURCE: &str = "agent-applications";

pub fn data_source() -> Arc<dyn ItemsDataSource<AgentApplication>> {
    Arc::new(RestResource::<AgentApplication>::new(RESOURCE))
}

pub fn review_url(id: &str, decision: ReviewDecision) -> String {
    format!("/api/{}/{}/{}", RESOURCE, id, decision.path_segment())
}

pub async fn review(id: &str, decision: ReviewDecision) -> Result<(), ApiError> {
    let response = Request::post(&api_url(&review_url(id, decision)))
        .header("Authorization", &auth_header()?)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    ensure_ok(&response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_url() {
        assert_eq!(
            review_url("17", ReviewDecision::Approve),
            "/api/agent-applications/17/approve"
        );
        assert_eq!(
            review_url("17", ReviewDecision::Reject),
            "/api/agent-applications/17/reject"
        );
    }
}
