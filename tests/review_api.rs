mod common;

use axum::http::{header, StatusCode};
use serde_json::{json, Value};

use common::{bearer, TestApp};

/// A restaurant owned by nobody in particular, for reviews to point at.
async fn restaurant(app: &TestApp, token: &str) -> i64 {
    let cuisine_id = app.cuisine(token, "Vietnamese").await;
    app.restaurant(token, json!({ "restaurantName": "Pho 24", "cuisineId": cuisine_id }))
        .await["restaurantId"]
        .as_i64()
        .unwrap()
}

#[tokio::test]
async fn test_every_valid_star_value_is_accepted() {
    let app = TestApp::new();
    let (user_id, token) = app.user("critic").await;
    let restaurant_id = restaurant(&app, &token).await;

    for stars in 1..=5 {
        let review = app.review(&token, restaurant_id, stars).await;
        assert_eq!(review["stars"], stars);
        assert_eq!(review["restaurantId"], restaurant_id);
        assert_eq!(review["user"]["userId"], user_id);
        assert_eq!(review["user"]["login"], "critic");

        let id = review["reviewId"].as_i64().unwrap();
        let new_stars = 6 - stars;
        let updated = app
            .server
            .put(&format!("/api/Reviews/{id}"))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({ "stars": new_stars }))
            .await;
        updated.assert_status_ok();
        assert_eq!(updated.json::<Value>()["stars"], new_stars);
    }
}

#[tokio::test]
async fn test_out_of_range_stars_are_rejected() {
    let app = TestApp::new();
    let (_, token) = app.user("critic").await;
    let restaurant_id = restaurant(&app, &token).await;
    let review_id = app.review(&token, restaurant_id, 3).await["reviewId"]
        .as_i64()
        .unwrap();

    for stars in [0, 6, -1] {
        let create = app
            .server
            .post("/api/Reviews")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({ "restaurantId": restaurant_id, "stars": stars }))
            .await;
        create.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(create.json::<Value>()["message"], "Stars must be between 1 and 5.");

        let update = app
            .server
            .put(&format!("/api/Reviews/{review_id}"))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({ "stars": stars }))
            .await;
        update.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(update.json::<Value>()["message"], "Stars must be between 1 and 5.");
    }

    assert_eq!(app.store.review_count(), 1);
}

#[tokio::test]
async fn test_author_comes_from_token_not_body() {
    let app = TestApp::new();
    let (victim_id, _) = app.user("victim").await;
    let (author_id, token) = app.user("author").await;
    let restaurant_id = restaurant(&app, &token).await;

    let response = app
        .server
        .post("/api/Reviews")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "restaurantId": restaurant_id, "stars": 5, "userId": victim_id }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["user"]["userId"], author_id);
}

#[tokio::test]
async fn test_review_for_missing_restaurant() {
    let app = TestApp::new();
    let (_, token) = app.user("critic").await;

    let response = app
        .server
        .post("/api/Reviews")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "restaurantId": 31337, "stars": 4 }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_author_or_admin_may_modify() {
    let app = TestApp::new();
    let (_, author) = app.user("author").await;
    let (_, stranger) = app.user("stranger").await;
    let admin = app.admin_token().await;
    let restaurant_id = restaurant(&app, &author).await;
    let review_id = app.review(&author, restaurant_id, 2).await["reviewId"]
        .as_i64()
        .unwrap();
    let path = format!("/api/Reviews/{review_id}");

    let update = app
        .server
        .put(&path)
        .add_header(header::AUTHORIZATION, bearer(&stranger))
        .json(&json!({ "stars": 5 }))
        .await;
    update.assert_status(StatusCode::FORBIDDEN);

    let delete = app
        .server
        .delete(&path)
        .add_header(header::AUTHORIZATION, bearer(&stranger))
        .await;
    delete.assert_status(StatusCode::FORBIDDEN);

    // 403 is decided before the id mismatch.
    let mismatched = app
        .server
        .put(&path)
        .add_header(header::AUTHORIZATION, bearer(&stranger))
        .json(&json!({ "reviewId": review_id + 1 }))
        .await;
    mismatched.assert_status(StatusCode::FORBIDDEN);

    let by_admin = app
        .server
        .put(&path)
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .json(&json!({ "comment": "Edited by staff" }))
        .await;
    by_admin.assert_status_ok();
    let body = by_admin.json::<Value>();
    assert_eq!(body["comment"], "Edited by staff");
    assert_eq!(body["stars"], 2);

    app.server
        .delete(&path)
        .add_header(header::AUTHORIZATION, bearer(&author))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_validation_order() {
    let app = TestApp::new();
    let (_, token) = app.user("author").await;
    let restaurant_id = restaurant(&app, &token).await;
    let review_id = app.review(&token, restaurant_id, 4).await["reviewId"]
        .as_i64()
        .unwrap();

    let missing = app
        .server
        .put("/api/Reviews/99999")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "stars": 9 }))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);

    let mismatch = app
        .server
        .put(&format!("/api/Reviews/{review_id}"))
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "reviewId": review_id + 1, "stars": 9 }))
        .await;
    mismatch.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(mismatch.json::<Value>()["message"], "Review ID mismatch.");

    let blank_comment = app
        .server
        .put(&format!("/api/Reviews/{review_id}"))
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "reviewId": review_id, "comment": "   " }))
        .await;
    blank_comment.assert_status_ok();
    assert_eq!(blank_comment.json::<Value>()["comment"], "Tasty");
}

#[tokio::test]
async fn test_reviews_for_restaurant() {
    let app = TestApp::new();
    let (_, token) = app.user("critic").await;
    let restaurant_id = restaurant(&app, &token).await;

    let empty = app
        .server
        .get(&format!("/api/Reviews/{restaurant_id}/reviews"))
        .await;
    empty.assert_status_ok();
    assert_eq!(empty.json::<Value>(), json!([]));

    app.review(&token, restaurant_id, 5).await;
    app.review(&token, restaurant_id, 1).await;
    let listed = app
        .server
        .get(&format!("/api/Reviews/{restaurant_id}/reviews"))
        .await
        .json::<Vec<Value>>();
    assert_eq!(listed.len(), 2);

    let detail = app
        .server
        .get(&format!("/api/Restaurants/{restaurant_id}"))
        .await
        .json::<Value>();
    assert_eq!(detail["reviews"].as_array().unwrap().len(), 2);
    assert_eq!(detail["reviews"][0]["user"]["login"], "critic");

    app.server
        .get("/api/Reviews/424242/reviews")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let all = app.server.get("/api/Reviews").await;
    all.assert_status_ok();
    assert_eq!(all.json::<Vec<Value>>().len(), 2);
}

#[tokio::test]
async fn test_malformed_review_update_is_bad_request() {
    let app = TestApp::new();
    let (_, token) = app.user("critic").await;
    let restaurant_id = restaurant(&app, &token).await;
    let review_id = app.review(&token, restaurant_id, 3).await["reviewId"]
        .as_i64()
        .unwrap();

    let response = app
        .server
        .put(&format!("/api/Reviews/{review_id}"))
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "reviewId": review_id, "stars": "four" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "BAD_REQUEST");

    let stored = app.server.get(&format!("/api/Reviews/{review_id}")).await;
    assert_eq!(stored.json::<Value>()["stars"], 3);
}
