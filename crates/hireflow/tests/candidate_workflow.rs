//! End-to-end scenarios for the candidate lifecycle through the public service facade and the
//! HTTP router, backed by the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use hireflow::workflows::candidates::{
    candidate_router, CandidateError, CandidateId, CandidateRepository, CandidateService,
    CandidateServiceError, CandidateStatus, CandidateView, DecisionAction, ErrorBody, ErrorCode,
    InMemoryCandidateRepository,
};

fn seeded_service() -> (
    CandidateService<InMemoryCandidateRepository>,
    InMemoryCandidateRepository,
) {
    let repository = InMemoryCandidateRepository::seeded();
    let service = CandidateService::new(Arc::new(repository.clone()));
    (service, repository)
}

async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("route executes");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&body).expect("json payload"))
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[test]
fn candidate_moves_from_new_to_a_terminal_status() {
    let (service, repository) = seeded_service();

    let created = service
        .create_candidate("Grace Hopper")
        .expect("creation succeeds");
    assert_eq!(created.id, CandidateId::from("c_3"));

    let shortlisted = service
        .apply_decision(
            &created.id,
            DecisionAction::Shortlist,
            "Outstanding compiler experience",
        )
        .expect("shortlist succeeds");
    assert_eq!(shortlisted.status, CandidateStatus::Shortlisted);

    let stored = repository
        .find_by_id(&created.id)
        .expect("store readable")
        .expect("candidate stored");
    assert_eq!(stored.status(), CandidateStatus::Shortlisted);

    match service.apply_decision(
        &created.id,
        DecisionAction::Reject,
        "Changed my mind about this",
    ) {
        Err(CandidateServiceError::Candidate(err @ CandidateError::InvalidTransition { .. })) => {
            assert_eq!(
                err.to_string(),
                "Cannot transition from SHORTLISTED to REJECTED"
            );
        }
        other => panic!("expected invalid transition, got {other:?}"),
    }
}

#[test]
fn unknown_candidates_are_reported_as_not_found() {
    let (service, repository) = seeded_service();

    let err = service
        .apply_decision(
            &CandidateId::from("c_999"),
            DecisionAction::Shortlist,
            "Strong technical background",
        )
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(repository.len().expect("store readable"), 2);
}

#[tokio::test]
async fn http_lifecycle_follows_the_transport_contract() {
    let (service, _) = seeded_service();
    let router = candidate_router(Arc::new(service));

    let (status, body) = send(&router, post("/api/candidates", json!({ "name": "Ada" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: CandidateView = serde_json::from_value(body).expect("candidate view");
    assert_eq!(created.status, CandidateStatus::New);

    let (status, body) = send(&router, post("/api/candidates", json!({ "name": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorBody = serde_json::from_value(body).expect("error body");
    assert_eq!(error.code, ErrorCode::ValidationError);

    let decision_uri = format!("/api/candidates/{}/decision", created.id);
    let (status, body) = send(
        &router,
        post(
            &decision_uri,
            json!({ "decision": "REJECT", "reason": "Does not meet the minimum requirements" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "REJECTED");

    let (status, body) = send(
        &router,
        post(
            &decision_uri,
            json!({ "decision": "SHORTLIST", "reason": "Actually reconsidering this candidate" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let error: ErrorBody = serde_json::from_value(body).expect("error body");
    assert_eq!(error.code, ErrorCode::InvalidTransition);
    assert_eq!(error.error, "Cannot transition from REJECTED to SHORTLISTED");

    let (status, body) = send(
        &router,
        Request::get("/api/candidates")
            .body(Body::empty())
            .expect("request builds"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let views: Vec<CandidateView> = serde_json::from_value(body).expect("candidate list");
    let names: Vec<_> = views.iter().map(|view| view.name.as_str()).collect();
    assert_eq!(names, ["Alice Johnson", "Bob Williams", "Ada"]);
    assert_eq!(views[2].status, CandidateStatus::Rejected);
}
