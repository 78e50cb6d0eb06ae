use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use learning_path::api::{configure, AppState};
use learning_path::planner::types::CurriculumItem;
use serde_json::{json, Value};
use std::sync::Arc;

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new($state)))
                .configure(configure),
        )
        .await
    };
}

fn seeded_state() -> AppState {
    let state = AppState::in_memory().unwrap();
    state
        .catalog
        .insert_items(&[
            CurriculumItem::new("db-1", "Introduction to Databases", 1)
                .with_topic("Relational Databases")
                .with_session("Intro to SQL", "LEARNING_SET"),
            CurriculumItem::new("db-2", "Introduction to Databases", 2)
                .with_topic("Querying")
                .with_session("SQL Practice", "PRACTICE")
                .with_duration("40"),
            CurriculumItem::new("db-3", "Introduction to Databases", 3)
                .with_topic("Joins")
                .with_session("Schema Workshop", "WORKSHOP"),
            CurriculumItem::new("pf-1", "Programming Foundations", 1)
                .with_topic("Variables")
                .with_duration("30"),
        ])
        .unwrap();
    state
}

fn path_request(skill: u8) -> Value {
    json!({
        "profile": { "hasBacklogs": false },
        "goals": {
            "currentSkillLevel": skill,
            "targetStack": "sql",
            "courseName": "Introduction to Databases"
        },
        "availability": {
            "weekdayHours": 2,
            "weekendHours": 0,
            "planDuration": "2-week"
        }
    })
}

fn student_payload() -> Value {
    json!({
        "profile": { "hasBacklogs": false, "name": "Asha", "year": "3rd" },
        "goals": { "currentSkillLevel": 2, "targetStack": "python", "primaryGoal": "placement" },
        "availability": { "weekdayHours": 1.5, "weekendHours": 3, "planDuration": "2-week" }
    })
}

#[actix_rt::test]
async fn test_health_check() {
    let app = init_app!(AppState::in_memory().unwrap());
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_rt::test]
async fn test_generate_path() {
    let app = init_app!(seeded_state());
    let req = test::TestRequest::post()
        .uri("/api/student/generate-path")
        .set_json(path_request(3))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["program"], "academy");
    assert_eq!(data["totalWeeks"], 1);
    assert_eq!(data["modules"][0]["coursesInWeek"], json!(["Introduction to Databases"]));
    assert_eq!(data["modules"][0]["sessions"][0]["id"], "db-1");
    assert_eq!(data["modules"][0]["status"], "current");
    assert_eq!(data["suggestion"]["nextCourse"], "Data Analytics Foundations");
    assert!(data.get("trackCompletion").is_none());
}

#[actix_rt::test]
async fn test_generate_path_without_curriculum_is_404() {
    let app = init_app!(AppState::in_memory().unwrap());
    let req = test::TestRequest::post()
        .uri("/api/student/generate-path")
        .set_json(path_request(3))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No curriculum found for the selected path.");
}

#[actix_rt::test]
async fn test_generate_path_rejects_bad_input() {
    let app = init_app!(seeded_state());

    let req = test::TestRequest::post()
        .uri("/api/student/generate-path")
        .set_json(path_request(9))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // missing goals section
    let req = test::TestRequest::post()
        .uri("/api/student/generate-path")
        .set_json(json!({ "availability": { "weekdayHours": 1, "weekendHours": 1 } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[actix_rt::test]
async fn test_student_data_lifecycle() {
    let app = init_app!(AppState::in_memory().unwrap());
    let uri = "/api/student/user-42";

    let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post().uri(uri).set_json(student_payload()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["userId"], "user-42");
    assert_eq!(body["data"]["profile"]["name"], "Asha");

    let req = test::TestRequest::post().uri(uri).set_json(student_payload()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Student data already exists. Use PUT to update.");

    let patch = json!({
        "availability": { "weekdayHours": 3, "weekendHours": 4, "planDuration": "1-month" }
    });
    let req = test::TestRequest::put().uri(uri).set_json(patch).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["availability"]["planDuration"], "1-month");
    // untouched sections are kept
    assert_eq!(body["data"]["goals"]["targetStack"], "python");
}

#[actix_rt::test]
async fn test_update_unknown_student_is_404() {
    let app = init_app!(AppState::in_memory().unwrap());
    let req = test::TestRequest::put()
        .uri("/api/student/nobody")
        .set_json(json!({ "goals": { "currentSkillLevel": 3 } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Student data not found");
}

#[actix_rt::test]
async fn test_curriculum_listing() {
    let app = init_app!(seeded_state());

    let req = test::TestRequest::get().uri("/api/curriculum/courses").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["data"],
        json!(["Introduction to Databases", "Programming Foundations"])
    );

    let req = test::TestRequest::get()
        .uri("/api/curriculum/courses/Introduction%20to%20Databases/sessions")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let sessions = body["data"].as_array().unwrap();
    let ids: Vec<&str> = sessions.iter().map(|s| s["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["db-1", "db-2", "db-3"]);

    // learning set default, recorded duration, unknown set type default
    let durations: Vec<u64> = sessions
        .iter()
        .map(|s| s["durationMins"].as_u64().unwrap())
        .collect();
    assert_eq!(durations, vec![18, 40, 15]);
}

#[actix_rt::test]
async fn test_sessions_of_unknown_course_is_empty() {
    let app = init_app!(seeded_state());
    let req = test::TestRequest::get()
        .uri("/api/curriculum/courses/Underwater%20Basket%20Weaving/sessions")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
}
