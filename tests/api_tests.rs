use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

use movie_night_api::api::{create_router, AppState};

fn create_test_server() -> TestServer {
    let state = AppState::new();
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

/// Creates a night and returns its id as a string
async fn create_night(server: &TestServer, name: &str) -> String {
    let response = server.post("/nights").json(&json!({ "name": name })).await;
    response.assert_status(StatusCode::CREATED);
    let night: serde_json::Value = response.json();
    night["id"].as_str().unwrap().to_string()
}

async fn add_candidate(server: &TestServer, night_id: &str, movie_id: &str) {
    let response = server
        .post(&format!("/nights/{}/candidates", night_id))
        .json(&json!({ "movie_id": movie_id }))
        .await;
    response.assert_status_ok();
}

async fn vote(server: &TestServer, night_id: &str, candidate: &str, participant: &str, direction: &str) {
    let response = server
        .post(&format!("/nights/{}/votes", night_id))
        .json(&json!({
            "candidate_id": candidate,
            "participant_id": participant,
            "direction": direction
        }))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_create_and_get_night() {
    let server = create_test_server();

    let response = server
        .post("/nights")
        .json(&json!({ "name": "Friday Horror" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    assert_eq!(created["name"], "Friday Horror");
    assert_eq!(created["phase"], "draft");
    assert_eq!(created["winner_id"], serde_json::Value::Null);
    assert_eq!(created["share_code"].as_str().unwrap().len(), 9);

    let id = created["id"].as_str().unwrap();
    let response = server.get(&format!("/nights/{}", id)).await;
    response.assert_status_ok();
    let fetched: serde_json::Value = response.json();
    assert_eq!(fetched["name"], "Friday Horror");
}

#[tokio::test]
async fn test_create_night_with_empty_name_is_rejected() {
    let server = create_test_server();
    let response = server.post("/nights").json(&json!({ "name": "  " })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_nights_newest_first() {
    let server = create_test_server();
    create_night(&server, "First").await;
    create_night(&server, "Second").await;

    let response = server.get("/nights").await;
    response.assert_status_ok();
    let nights: Vec<serde_json::Value> = response.json();
    assert_eq!(nights.len(), 2);
    assert_eq!(nights[0]["name"], "Second");
    assert_eq!(nights[1]["name"], "First");
}

#[tokio::test]
async fn test_share_code_lookup() {
    let server = create_test_server();

    let response = server
        .post("/nights")
        .json(&json!({ "name": "Friday Horror" }))
        .await;
    let created: serde_json::Value = response.json();
    let code = created["share_code"].as_str().unwrap();

    let response = server.get(&format!("/nights/by-code/{}", code)).await;
    response.assert_status_ok();
    let found: serde_json::Value = response.json();
    assert_eq!(found["id"], created["id"]);

    let response = server.get("/nights/by-code/notacode9").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_voting_round_trip() {
    let server = create_test_server();
    let id = create_night(&server, "Movie Night X").await;

    add_candidate(&server, &id, "m1").await;

    let response = server.post(&format!("/nights/{}/start", id)).await;
    response.assert_status_ok();
    let night: serde_json::Value = response.json();
    assert_eq!(night["phase"], "voting");
    assert_eq!(night["ledger"]["m1"]["tally"], 0);

    vote(&server, &id, "m1", "p1", "up").await;

    let response = server.post(&format!("/nights/{}/finish", id)).await;
    response.assert_status_ok();
    let night: serde_json::Value = response.json();
    assert_eq!(night["phase"], "completed");
    assert_eq!(night["winner_id"], "m1");
    assert_eq!(night["ledger"]["m1"]["tally"], 1);
}

#[tokio::test]
async fn test_three_voters_pick_the_winner() {
    let server = create_test_server();
    let id = create_night(&server, "Group Pick").await;

    add_candidate(&server, &id, "m1").await;
    add_candidate(&server, &id, "m2").await;
    server.post(&format!("/nights/{}/start", id)).await;

    for participant in ["p1", "p2", "p3"] {
        vote(&server, &id, "m2", participant, "up").await;
    }

    let response = server.post(&format!("/nights/{}/finish", id)).await;
    response.assert_status_ok();
    let night: serde_json::Value = response.json();
    assert_eq!(night["winner_id"], "m2");
}

#[tokio::test]
async fn test_tie_break_prefers_selection_order() {
    let server = create_test_server();
    let id = create_night(&server, "Tied Night").await;

    for movie in ["a", "b", "c"] {
        add_candidate(&server, &id, movie).await;
    }
    server.post(&format!("/nights/{}/start", id)).await;

    // Tallies end up a=2, b=2, c=1
    vote(&server, &id, "a", "p1", "up").await;
    vote(&server, &id, "a", "p2", "up").await;
    vote(&server, &id, "b", "p3", "up").await;
    vote(&server, &id, "b", "p4", "up").await;
    vote(&server, &id, "c", "p5", "up").await;

    let response = server.post(&format!("/nights/{}/finish", id)).await;
    let night: serde_json::Value = response.json();
    assert_eq!(night["winner_id"], "a");
}

#[tokio::test]
async fn test_duplicate_vote_is_rejected_and_tally_unchanged() {
    let server = create_test_server();
    let id = create_night(&server, "Strict Night").await;

    add_candidate(&server, &id, "m1").await;
    server.post(&format!("/nights/{}/start", id)).await;
    vote(&server, &id, "m1", "p1", "up").await;

    let response = server
        .post(&format!("/nights/{}/votes", id))
        .json(&json!({
            "candidate_id": "m1",
            "participant_id": "p1",
            "direction": "down"
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let response = server.get(&format!("/nights/{}", id)).await;
    let night: serde_json::Value = response.json();
    assert_eq!(night["ledger"]["m1"]["tally"], 1);
    assert_eq!(night["ledger"]["m1"]["voters"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_down_votes_subtract() {
    let server = create_test_server();
    let id = create_night(&server, "Divisive Night").await;

    add_candidate(&server, &id, "m1").await;
    server.post(&format!("/nights/{}/start", id)).await;
    vote(&server, &id, "m1", "p1", "down").await;
    vote(&server, &id, "m1", "p2", "down").await;

    let response = server.get(&format!("/nights/{}", id)).await;
    let night: serde_json::Value = response.json();
    assert_eq!(night["ledger"]["m1"]["tally"], -2);
}

#[tokio::test]
async fn test_vote_before_voting_opens_is_rejected() {
    let server = create_test_server();
    let id = create_night(&server, "Eager Night").await;
    add_candidate(&server, &id, "m1").await;

    let response = server
        .post(&format!("/nights/{}/votes", id))
        .json(&json!({
            "candidate_id": "m1",
            "participant_id": "p1",
            "direction": "up"
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_start_voting_without_candidates_is_rejected() {
    let server = create_test_server();
    let id = create_night(&server, "Empty Night").await;

    let response = server.post(&format!("/nights/{}/start", id)).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_finish_voting_twice_is_rejected() {
    let server = create_test_server();
    let id = create_night(&server, "Done Night").await;
    add_candidate(&server, &id, "m1").await;
    server.post(&format!("/nights/{}/start", id)).await;

    let response = server.post(&format!("/nights/{}/finish", id)).await;
    response.assert_status_ok();
    let response = server.post(&format!("/nights/{}/finish", id)).await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_removed_candidate_can_no_longer_receive_votes() {
    let server = create_test_server();
    let id = create_night(&server, "Shrinking Night").await;

    add_candidate(&server, &id, "m1").await;
    add_candidate(&server, &id, "m2").await;
    server.post(&format!("/nights/{}/start", id)).await;

    let response = server
        .delete(&format!("/nights/{}/candidates/m1", id))
        .await;
    response.assert_status_ok();
    let night: serde_json::Value = response.json();
    assert!(night["ledger"].get("m1").is_none());

    let response = server
        .post(&format!("/nights/{}/votes", id))
        .json(&json!({
            "candidate_id": "m1",
            "participant_id": "p1",
            "direction": "up"
        }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reopen_voting_clears_winner_and_keeps_tallies() {
    let server = create_test_server();
    let id = create_night(&server, "Second Thoughts").await;

    add_candidate(&server, &id, "m1").await;
    server.post(&format!("/nights/{}/start", id)).await;
    vote(&server, &id, "m1", "p1", "up").await;
    server.post(&format!("/nights/{}/finish", id)).await;

    let response = server.post(&format!("/nights/{}/reopen", id)).await;
    response.assert_status_ok();
    let night: serde_json::Value = response.json();
    assert_eq!(night["phase"], "voting");
    assert_eq!(night["winner_id"], serde_json::Value::Null);
    assert_eq!(night["ledger"]["m1"]["tally"], 1);
}

#[tokio::test]
async fn test_adding_unknown_movie_returns_warning() {
    let server = create_test_server();
    let id = create_night(&server, "Obscure Night").await;

    let response = server
        .post(&format!("/nights/{}/candidates", id))
        .json(&json!({ "movie_id": "definitely-not-in-catalog" }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["warning"]
        .as_str()
        .unwrap()
        .contains("definitely-not-in-catalog"));

    // A catalog hit produces no warning field at all
    let response = server
        .post(&format!("/nights/{}/candidates", id))
        .json(&json!({ "movie_id": "m1" }))
        .await;
    let body: serde_json::Value = response.json();
    assert!(body.get("warning").is_none());
}

#[tokio::test]
async fn test_rename_and_delete_night() {
    let server = create_test_server();
    let id = create_night(&server, "Old Name").await;

    let response = server
        .patch(&format!("/nights/{}", id))
        .json(&json!({ "name": "New Name" }))
        .await;
    response.assert_status_ok();
    let night: serde_json::Value = response.json();
    assert_eq!(night["name"], "New Name");

    let response = server.delete(&format!("/nights/{}", id)).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get(&format!("/nights/{}", id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_lookup_and_search() {
    let server = create_test_server();

    let response = server.get("/movies/m1").await;
    response.assert_status_ok();
    let movie: serde_json::Value = response.json();
    assert_eq!(movie["title"], "The Matrix");

    let response = server.get("/movies/m999").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server.get("/movies/search").add_query_param("q", "sci-fi").await;
    response.assert_status_ok();
    let movies: Vec<serde_json::Value> = response.json();
    assert!(movies.len() >= 2);
}
