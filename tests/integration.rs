use actix_web::{test, web, App};
use serde_json::{json, Value};

use roost::Store;

// Each test builds its own app over a fresh store, so tests stay
// independent without going through the reset endpoint.
macro_rules! app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data($store.clone())
                .configure(roost::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn create_user_returns_created_profile() {
    let store = web::Data::new(Store::new());
    let app = app!(store);

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({
            "username": "ava",
            "display_name": "Ava",
            "bio": "first here"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "ava");
    assert_eq!(body["display_name"], "Ava");
    assert_eq!(body["bio"], "first here");
    assert_eq!(body["followers_count"], 0);
    assert_eq!(body["following_count"], 0);
    assert_eq!(body["post_count"], 0);
    let id = body["id"].as_str().expect("id should be present");

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn duplicate_username_is_conflict() {
    let store = web::Data::new(Store::new());
    let app = app!(store);

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"username": "casey", "display_name": "Casey"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    // Case-insensitive collision.
    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"username": "Casey", "display_name": "Other"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn unknown_ids_map_to_not_found() {
    let store = web::Data::new(Store::new());
    let app = app!(store);

    for uri in [
        "/users/missing",
        "/posts/missing",
        "/users/missing/timeline",
        "/users/missing/mentions",
        "/users/missing/followers",
        "/users/missing/posts",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404, "uri {}", uri);
    }
}

#[actix_web::test]
async fn post_validation_maps_to_bad_request() {
    let store = web::Data::new(Store::new());
    let app = app!(store);
    let author = store.create_user("lena", "Lena", None).unwrap();

    for content in ["".to_string(), "x".repeat(281)] {
        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"user_id": author.id, "content": content}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }
}

#[actix_web::test]
async fn timeline_mentions_and_trending_flow() {
    let store = web::Data::new(Store::new());
    let app = app!(store);

    let ava = store.create_user("ava", "Ava", None).unwrap();
    let bea = store.create_user("bea", "Bea", None).unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/users/{}/follow", ava.id))
        .set_json(json!({"target_user_id": bea.id}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({"user_id": bea.id, "content": "hello #demo @ava"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let post: Value = test::read_body_json(resp).await;
    let post_id = post["id"].as_str().unwrap().to_string();
    assert_eq!(post["hashtags"], json!(["demo"]));
    assert_eq!(post["mentions"], json!(["ava"]));

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}/timeline", ava.id))
        .to_request();
    let timeline: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(timeline[0]["id"].as_str(), Some(post_id.as_str()));

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}/mentions", ava.id))
        .to_request();
    let mentions: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(mentions[0]["id"].as_str(), Some(post_id.as_str()));

    for tag in ["demo", "DEMO"] {
        let req = test::TestRequest::get()
            .uri(&format!("/hashtags/{}/posts", tag))
            .to_request();
        let feed: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(feed.as_array().map(Vec::len), Some(1), "tag {}", tag);
    }

    let req = test::TestRequest::get().uri("/trending").to_request();
    let trending: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(trending, json!([{"hashtag": "demo", "count": 1}]));

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{}", post_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let req = test::TestRequest::get().uri("/trending").to_request();
    let trending: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(trending, json!([]));

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}/timeline", ava.id))
        .to_request();
    let timeline: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(timeline, json!([]));
}

#[actix_web::test]
async fn follow_edge_cases_over_http() {
    let store = web::Data::new(Store::new());
    let app = app!(store);

    let a = store.create_user("one", "One", None).unwrap();
    let b = store.create_user("two", "Two", None).unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/users/{}/follow", a.id))
        .set_json(json!({"target_user_id": a.id}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::post()
        .uri(&format!("/users/{}/follow", a.id))
        .set_json(json!({"target_user_id": b.id}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::post()
        .uri(&format!("/users/{}/follow", a.id))
        .set_json(json!({"target_user_id": b.id}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 409);

    // Unfollow twice: both succeed, the second is a no-op.
    for _ in 0..2 {
        let req = test::TestRequest::delete()
            .uri(&format!("/users/{}/follow?target_user_id={}", a.id, b.id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
    }
    assert_eq!(store.get_user(&b.id).unwrap().followers_count, 0);
}

#[actix_web::test]
async fn like_unlike_over_http() {
    let store = web::Data::new(Store::new());
    let app = app!(store);

    let author = store.create_user("author", "Author", None).unwrap();
    let post = store.create_post(&author.id, "like this").unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/like", post.id))
        .set_json(json!({"user_id": "reader-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["like_count"], 1);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/like", post.id))
        .set_json(json!({"user_id": "reader-1"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 409);

    for expected in [0, 0] {
        let req = test::TestRequest::delete()
            .uri(&format!("/posts/{}/like?user_id=reader-1", post.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["like_count"], expected);
    }
}

#[actix_web::test]
async fn repost_and_quote_embed_origin_one_level() {
    let store = web::Data::new(Store::new());
    let app = app!(store);

    let author = store.create_user("origin", "Origin", None).unwrap();
    let fan = store.create_user("fan", "Fan", None).unwrap();
    let original = store.create_post(&author.id, "share me").unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/repost", original.id))
        .set_json(json!({"user_id": fan.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let repost: Value = test::read_body_json(resp).await;
    assert_eq!(repost["kind"], "repost");
    assert!(repost["content"].is_null());
    assert_eq!(repost["origin"]["id"].as_str(), Some(original.id.as_str()));
    assert_eq!(repost["origin_id"].as_str(), Some(original.id.as_str()));

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/quote", original.id))
        .set_json(json!({"user_id": fan.id, "content": "adding context"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let quote: Value = test::read_body_json(resp).await;
    assert_eq!(quote["kind"], "quote");
    assert_eq!(quote["content"], "adding context");

    // Deleting the origin leaves the repost with a dangling reference
    // rendered as an absent origin.
    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{}", original.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", repost["id"].as_str().unwrap()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched["origin_id"].as_str(), Some(original.id.as_str()));
    assert!(fetched["origin"].is_null());
}

#[actix_web::test]
async fn reset_empties_the_store() {
    let store = web::Data::new(Store::new());
    let app = app!(store);

    let u = store.create_user("temp", "Temp", None).unwrap();
    store.create_post(&u.id, "soon gone #tag").unwrap();

    let req = test::TestRequest::post().uri("/admin/reset").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", u.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::get().uri("/trending").to_request();
    let trending: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(trending, json!([]));
}
