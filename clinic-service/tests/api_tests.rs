mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_principal_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/principals")
        .json(&json!({
            "username": "frontdesk",
            "email": "frontdesk@example.com",
            "full_name": "Front Desk",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "frontdesk");
    assert_eq!(body["data"]["email"], "frontdesk@example.com");
    // Registration never grants anything above the lowest role.
    assert_eq!(body["data"]["role"], "reception");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
}

#[tokio::test]
async fn test_create_principal_duplicate_username() {
    let app = TestApp::spawn().await;

    app.post("/api/principals")
        .json(&json!({
            "username": "frontdesk",
            "email": "frontdesk@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/principals")
        .json(&json!({
            "username": "frontdesk",
            "email": "other@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_principal_duplicate_email() {
    let app = TestApp::spawn().await;

    app.post("/api/principals")
        .json(&json!({
            "username": "frontdesk",
            "email": "frontdesk@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/principals")
        .json(&json!({
            "username": "other",
            "email": "frontdesk@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_principal_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/principals")
        .json(&json!({
            "username": "frontdesk",
            "email": "not-an-email",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_principals_requires_admin_role() {
    let app = TestApp::spawn().await;

    let reception_token = app
        .principal_with_role("frontdesk", "frontdesk@example.com", "pass_word!", "reception")
        .await;
    let admin_token = app
        .principal_with_role("boss", "boss@example.com", "pass_word!", "admin")
        .await;

    let forbidden = app
        .get_authenticated("/api/principals", &reception_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let allowed = app
        .get_authenticated("/api/principals", &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(allowed.status(), StatusCode::OK);

    let body: serde_json::Value = allowed.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_get_principal_requires_authentication() {
    let app = TestApp::spawn().await;

    let admin_token = app
        .principal_with_role("boss", "boss@example.com", "pass_word!", "admin")
        .await;

    let listed: serde_json::Value = app
        .get_authenticated("/api/principals", &admin_token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let principal_id = listed["data"][0]["id"].as_str().unwrap().to_string();

    let anonymous = app
        .get(&format!("/api/principals/{}", principal_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let authenticated = app
        .get_authenticated(&format!("/api/principals/{}", principal_id), &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(authenticated.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_principal_partial_preserves_unset_fields() {
    let app = TestApp::spawn().await;

    let admin_token = app
        .principal_with_role("boss", "boss@example.com", "pass_word!", "admin")
        .await;

    app.post("/api/principals")
        .json(&json!({
            "username": "frontdesk",
            "email": "frontdesk@example.com",
            "full_name": "Front Desk",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let listed: serde_json::Value = app
        .get_authenticated("/api/principals", &admin_token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let principal_id = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["username"] == "frontdesk")
        .and_then(|p| p["id"].as_str())
        .unwrap()
        .to_string();

    let response = app
        .patch_authenticated(&format!("/api/principals/{}", principal_id), &admin_token)
        .json(&json!({ "full_name": "Front Desk Jr" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["full_name"], "Front Desk Jr");
    // Untouched fields survive the partial update.
    assert_eq!(body["data"]["username"], "frontdesk");
    assert_eq!(body["data"]["email"], "frontdesk@example.com");
}

#[tokio::test]
async fn test_replace_principal_requires_full_body() {
    let app = TestApp::spawn().await;

    let admin_token = app
        .principal_with_role("boss", "boss@example.com", "pass_word!", "admin")
        .await;

    app.post("/api/principals")
        .json(&json!({
            "username": "frontdesk",
            "email": "frontdesk@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let listed: serde_json::Value = app
        .get_authenticated("/api/principals", &admin_token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let principal_id = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["username"] == "frontdesk")
        .and_then(|p| p["id"].as_str())
        .unwrap()
        .to_string();

    // A partial body is rejected on the replace route.
    let partial = app
        .put_authenticated(&format!("/api/principals/{}", principal_id), &admin_token)
        .json(&json!({ "full_name": "Front Desk Jr" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(partial.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let full = app
        .put_authenticated(&format!("/api/principals/{}", principal_id), &admin_token)
        .json(&json!({
            "username": "frontdesk2",
            "email": "frontdesk2@example.com",
            "full_name": "Front Desk II",
            "password": "new_pass_word!",
            "role": "reception"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(full.status(), StatusCode::OK);

    let body: serde_json::Value = full.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "frontdesk2");
    assert_eq!(body["data"]["email"], "frontdesk2@example.com");
}

#[tokio::test]
async fn test_update_principal_requires_admin_role() {
    let app = TestApp::spawn().await;

    let reception_token = app
        .principal_with_role("frontdesk", "frontdesk@example.com", "pass_word!", "reception")
        .await;

    let response = app
        .patch_authenticated(
            "/api/principals/00000000-0000-0000-0000-000000000000",
            &reception_token,
        )
        .json(&json!({ "full_name": "Nope" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_principal() {
    let app = TestApp::spawn().await;

    let admin_token = app
        .principal_with_role("boss", "boss@example.com", "pass_word!", "admin")
        .await;

    app.post("/api/principals")
        .json(&json!({
            "username": "frontdesk",
            "email": "frontdesk@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let listed: serde_json::Value = app
        .get_authenticated("/api/principals", &admin_token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let principal_id = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["username"] == "frontdesk")
        .and_then(|p| p["id"].as_str())
        .unwrap()
        .to_string();

    let response = app
        .delete_authenticated(&format!("/api/principals/{}", principal_id), &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let gone = app
        .get_authenticated(&format!("/api/principals/{}", principal_id), &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_doctor_requires_admin_role() {
    let app = TestApp::spawn().await;

    let reception_token = app
        .principal_with_role("frontdesk", "frontdesk@example.com", "pass_word!", "reception")
        .await;

    let response = app
        .post_authenticated("/api/doctors", &reception_token)
        .json(&json!({
            "username": "drwho",
            "email": "drwho@example.com",
            "password": "pass_word!",
            "specialization": "Cardiology"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_doctor_creates_profile() {
    let app = TestApp::spawn().await;

    let admin_token = app
        .principal_with_role("boss", "boss@example.com", "pass_word!", "admin")
        .await;

    let response = app
        .post_authenticated("/api/doctors", &admin_token)
        .json(&json!({
            "username": "drwho",
            "email": "drwho@example.com",
            "full_name": "Dr Who",
            "password": "pass_word!",
            "specialization": "Cardiology"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["role"], "doctor");
    let doctor_id = body["data"]["id"].as_str().unwrap().to_string();

    let specialization: (String,) = sqlx::query_as(
        "SELECT specialization FROM doctor_profiles WHERE principal_id = $1::uuid",
    )
    .bind(&doctor_id)
    .fetch_one(&app.db.pool)
    .await
    .expect("Doctor profile missing");
    assert_eq!(specialization.0, "Cardiology");
}

#[tokio::test]
async fn test_delete_doctor_cascades_profile() {
    let app = TestApp::spawn().await;

    let admin_token = app
        .principal_with_role("boss", "boss@example.com", "pass_word!", "admin")
        .await;

    let created: serde_json::Value = app
        .post_authenticated("/api/doctors", &admin_token)
        .json(&json!({
            "username": "drwho",
            "email": "drwho@example.com",
            "password": "pass_word!",
            "specialization": "Cardiology"
        }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let doctor_id = created["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .delete_authenticated(&format!("/api/principals/{}", doctor_id), &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let profiles: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM doctor_profiles WHERE principal_id = $1::uuid")
            .bind(&doctor_id)
            .fetch_one(&app.db.pool)
            .await
            .expect("Failed to count profiles");
    assert_eq!(profiles.0, 0);
}

#[tokio::test]
async fn test_create_patient_requires_reception_role() {
    let app = TestApp::spawn().await;

    // Role checks are an equality test: an admin is not reception.
    let admin_token = app
        .principal_with_role("boss", "boss@example.com", "pass_word!", "admin")
        .await;

    let response = app
        .post_authenticated("/api/patients", &admin_token)
        .json(&json!({
            "first_name": "Ada",
            "phone": "612345678"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_patient_success() {
    let app = TestApp::spawn().await;

    let reception_token = app
        .principal_with_role("frontdesk", "frontdesk@example.com", "pass_word!", "reception")
        .await;

    let response = app
        .post_authenticated("/api/patients", &reception_token)
        .json(&json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "phone": "612345678",
            "email": "ada@example.com",
            "date_of_birth": "1990-12-10"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["first_name"], "Ada");
    assert_eq!(body["data"]["phone"], "612345678");
    assert_eq!(body["data"]["date_of_birth"], "1990-12-10");
    assert!(body["data"]["id"].is_string());
}

#[tokio::test]
async fn test_create_patient_invalid_phone() {
    let app = TestApp::spawn().await;

    let reception_token = app
        .principal_with_role("frontdesk", "frontdesk@example.com", "pass_word!", "reception")
        .await;

    for phone in ["12345678", "1234567890", "61234567a"] {
        let response = app
            .post_authenticated("/api/patients", &reception_token)
            .json(&json!({
                "first_name": "Ada",
                "phone": phone
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn test_create_patient_duplicate_phone() {
    let app = TestApp::spawn().await;

    let reception_token = app
        .principal_with_role("frontdesk", "frontdesk@example.com", "pass_word!", "reception")
        .await;

    app.post_authenticated("/api/patients", &reception_token)
        .json(&json!({
            "first_name": "Ada",
            "phone": "612345678"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post_authenticated("/api/patients", &reception_token)
        .json(&json!({
            "first_name": "Grace",
            "phone": "612345678"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_patient_lifecycle() {
    let app = TestApp::spawn().await;

    let reception_token = app
        .principal_with_role("frontdesk", "frontdesk@example.com", "pass_word!", "reception")
        .await;

    let created: serde_json::Value = app
        .post_authenticated("/api/patients", &reception_token)
        .json(&json!({
            "first_name": "Ada",
            "phone": "612345678"
        }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let patient_id = created["data"]["id"].as_str().unwrap().to_string();

    let listed = app
        .get_authenticated("/api/patients", &reception_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(listed.status(), StatusCode::OK);
    let listed: serde_json::Value = listed.json().await.expect("Failed to parse response");
    assert_eq!(listed["data"].as_array().map(Vec::len), Some(1));

    let patched = app
        .patch_authenticated(&format!("/api/patients/{}", patient_id), &reception_token)
        .json(&json!({ "last_name": "Lovelace" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(patched.status(), StatusCode::OK);
    let patched: serde_json::Value = patched.json().await.expect("Failed to parse response");
    assert_eq!(patched["data"]["last_name"], "Lovelace");
    assert_eq!(patched["data"]["first_name"], "Ada");

    let deleted = app
        .delete_authenticated(&format!("/api/patients/{}", patient_id), &reception_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(deleted.status(), StatusCode::OK);

    let gone = app
        .get_authenticated(&format!("/api/patients/{}", patient_id), &reception_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_patient_unknown_id() {
    let app = TestApp::spawn().await;

    let reception_token = app
        .principal_with_role("frontdesk", "frontdesk@example.com", "pass_word!", "reception")
        .await;

    let response = app
        .get_authenticated(
            "/api/patients/00000000-0000-0000-0000-000000000000",
            &reception_token,
        )
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
