use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};


use test_harness::{router_for, schema_for, start_upstream};

async fn mount_get(upstream: &MockServer, at: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(upstream)
        .await;
}

#[tokio::test]
async fn collection_query_preserves_upstream_length_and_order() {
    let upstream = start_upstream().await;
    mount_get(
        &upstream,
        "/posts",
        json!([
            { "id": 1, "userId": 1, "title": "first", "body": "a" },
            { "id": 3, "userId": 2, "title": "third", "body": "c" },
            { "id": 2, "userId": 1, "title": "second", "body": "b" },
        ]),
    )
    .await;
    let schema = schema_for(&upstream);

    let response = schema.execute("{ posts { id title } }").await;

    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    let data = response.data.into_json().expect("data should be json");
    let posts = data["posts"].as_array().expect("posts should be a list");
    assert_eq!(posts.len(), 3);
    let ids: Vec<i64> = posts.iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 3, 2], "order must match the upstream response");
}

#[tokio::test]
async fn single_entity_query_projects_upstream_fields() {
    let upstream = start_upstream().await;
    mount_get(
        &upstream,
        "/posts/1",
        json!({
            "id": 1,
            "userId": 1,
            "title": "sunt aut facere repellat",
            "body": "quia et suscipit"
        }),
    )
    .await;
    let schema = schema_for(&upstream);

    let response = schema.execute("{ post(id: 1) { id userId title body } }").await;

    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    let data = response.data.into_json().expect("data should be json");
    assert_eq!(data["post"]["title"], "sunt aut facere repellat");
    assert_eq!(data["post"]["userId"], 1);
}

#[tokio::test]
async fn filtered_collection_query_passes_foreign_key_to_upstream() {
    let upstream = start_upstream().await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("postId", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 21, "postId": 5, "name": "n", "email": "e@example.com", "body": "b" },
        ])))
        .expect(1)
        .mount(&upstream)
        .await;
    let schema = schema_for(&upstream);

    let response = schema.execute("{ postComments(postId: 5) { id postId } }").await;

    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    let data = response.data.into_json().expect("data should be json");
    assert_eq!(data["postComments"][0]["postId"], 5);
}

#[tokio::test]
async fn nested_photos_are_filtered_by_the_parent_album_id() {
    let upstream = start_upstream().await;
    mount_get(&upstream, "/albums/3", json!({ "id": 3, "userId": 1, "title": "omnis" })).await;
    Mock::given(method("GET"))
        .and(path("/photos"))
        .and(query_param("albumId", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 101, "albumId": 3, "title": "p1", "url": "u1", "thumbnailUrl": "t1" },
            { "id": 102, "albumId": 3, "title": "p2", "url": "u2", "thumbnailUrl": "t2" },
        ])))
        .expect(1)
        .mount(&upstream)
        .await;
    let schema = schema_for(&upstream);

    let response = schema.execute("{ album(id: 3) { photos { id albumId } } }").await;

    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    let data = response.data.into_json().expect("data should be json");
    let photos = data["album"]["photos"].as_array().expect("photos should be a list");
    assert_eq!(photos.len(), 2);
    for photo in photos {
        assert_eq!(photo["albumId"], 3);
    }
}

#[tokio::test]
async fn user_with_posts_issues_one_fetch_and_one_filtered_fetch() {
    let upstream = start_upstream().await;
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz"
        })))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("userId", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "userId": 1, "title": "first post", "body": "a" },
            { "id": 2, "userId": 1, "title": "second post", "body": "b" },
        ])))
        .expect(1)
        .mount(&upstream)
        .await;
    let schema = schema_for(&upstream);

    let response = schema.execute("{ user(id: 1) { name posts { title } } }").await;

    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    let data = response.data.into_json().expect("data should be json");
    assert_eq!(data["user"]["name"], "Leanne Graham");
    let titles: Vec<&str> = data["user"]["posts"]
        .as_array()
        .expect("posts should be a list")
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["first post", "second post"]);
}

#[tokio::test]
async fn upstream_failure_nulls_the_field_and_leaves_siblings_intact() {
    let upstream = start_upstream().await;
    Mock::given(method("GET"))
        .and(path("/todos/999"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&upstream)
        .await;
    mount_get(
        &upstream,
        "/posts/1",
        json!({ "id": 1, "userId": 1, "title": "still fine", "body": "b" }),
    )
    .await;
    let schema = schema_for(&upstream);

    let response = schema
        .execute("{ todo(id: 999) { id } post(id: 1) { title } }")
        .await;

    let body = serde_json::to_value(&response).expect("response should serialize");
    assert_eq!(body["data"]["todo"], Value::Null);
    assert_eq!(body["data"]["post"]["title"], "still fine");
    let errors = body["errors"].as_array().expect("one field error expected");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["path"], json!(["todo"]));
    assert_eq!(errors[0]["extensions"]["code"], "UPSTREAM_ERROR");
    assert_eq!(errors[0]["extensions"]["status"], 500);
}

#[tokio::test]
async fn transport_failures_carry_a_distinct_error_code() {
    let upstream = start_upstream().await;
    let schema = schema_for(&upstream);
    // Shut the mock down so the call fails at the connection level.
    drop(upstream);

    let response = schema.execute("{ users { id } }").await;

    let body = serde_json::to_value(&response).expect("response should serialize");
    assert_eq!(body["data"]["users"], Value::Null);
    let errors = body["errors"].as_array().expect("one field error expected");
    assert_eq!(errors[0]["extensions"]["code"], "TRANSPORT_ERROR");
}

#[tokio::test]
async fn graphql_endpoint_speaks_json_over_http() {
    let upstream = start_upstream().await;
    mount_get(
        &upstream,
        "/todos",
        json!([{ "id": 1, "userId": 1, "title": "delectus aut autem", "completed": false }]),
    )
    .await;
    let app = router_for(&upstream);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/graphql")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({ "query": "{ todos { title completed } }" }))
                        .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["data"]["todos"][0]["title"], "delectus aut autem");
    assert_eq!(body["data"]["todos"][0]["completed"], false);
}

#[tokio::test]
async fn graphiql_explorer_is_served_on_get() {
    let upstream = start_upstream().await;
    let app = router_for(&upstream);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/graphql")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.to_ascii_lowercase().contains("graphiql"));
}
