mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn create_habit_fills_defaults() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (token, user_id) = common::register(server, &client, "habit_user").await?;

    let res = client
        .post(format!("{}/api/habits", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "stretch" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["name"], "stretch");
    assert_eq!(body["data"]["icon"], "🌱");
    assert_eq!(body["data"]["color"], "bg-[#7FBC8C]");
    assert_eq!(body["data"]["streak"].as_i64(), Some(0));
    assert!(body["data"]["lastCompleted"].is_null());
    assert_eq!(body["data"]["userId"].as_i64(), Some(user_id));
    Ok(())
}

#[tokio::test]
async fn habit_name_is_required() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (token, _id) = common::register(server, &client, "nameless_habit_user").await?;

    let res = client
        .post(format!("{}/api/habits", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "icon": "🔥" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "Habit name is required");
    Ok(())
}

#[tokio::test]
async fn same_day_checkin_twice_restores_original_state() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (token, _id) = common::register(server, &client, "checkin_user").await?;

    let res = client
        .post(format!("{}/api/habits", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "meditate" }))
        .send()
        .await?;
    let habit_id = res.json::<serde_json::Value>().await?["data"]["id"]
        .as_i64()
        .unwrap();

    // toggle on
    let res = client
        .put(format!("{}/api/habits/{}/checkin", server.base_url, habit_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["streak"].as_i64(), Some(1));
    assert!(body["data"]["lastCompleted"].is_string());
    assert_eq!(body["data"]["prevStreak"].as_i64(), Some(0));

    // toggle off: back to the pre-check-in state, shadows cleared
    let res = client
        .put(format!("{}/api/habits/{}/checkin", server.base_url, habit_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["streak"].as_i64(), Some(0));
    assert!(body["data"]["lastCompleted"].is_null());
    assert!(body["data"]["prevStreak"].is_null());
    assert!(body["data"]["prevLastCompleted"].is_null());
    Ok(())
}

#[tokio::test]
async fn habits_are_fenced_per_owner() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (owner_token, _owner_id) = common::register(server, &client, "habit_owner").await?;
    let (intruder_token, _intruder_id) =
        common::register(server, &client, "habit_intruder").await?;

    let res = client
        .post(format!("{}/api/habits", server.base_url))
        .bearer_auth(&owner_token)
        .json(&json!({ "name": "journal" }))
        .send()
        .await?;
    let habit_id = res.json::<serde_json::Value>().await?["data"]["id"]
        .as_i64()
        .unwrap();

    let res = client
        .put(format!("{}/api/habits/{}/checkin", server.base_url, habit_id))
        .bearer_auth(&intruder_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .delete(format!("{}/api/habits/{}", server.base_url, habit_id))
        .bearer_auth(&intruder_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn delete_habit_reports_one_change() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (token, _id) = common::register(server, &client, "habit_deleter").await?;

    let res = client
        .post(format!("{}/api/habits", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "fleeting" }))
        .send()
        .await?;
    let habit_id = res.json::<serde_json::Value>().await?["data"]["id"]
        .as_i64()
        .unwrap();

    let res = client
        .delete(format!("{}/api/habits/{}", server.base_url, habit_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "deleted");
    assert_eq!(body["data"]["changes"].as_i64(), Some(1));

    let res = client
        .delete(format!("{}/api/habits/{}", server.base_url, habit_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
