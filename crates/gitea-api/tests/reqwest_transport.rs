//! End-to-end tests of the request helpers over a real HTTP connection.

use gitea_api::{GiteaApi, Integration, Paginated, Pagination, Query};
use mockito::{Matcher, Server};
use serde_json::{json, Value};

fn integration(server: &Server) -> Integration {
    Integration::new(format!("{}/api/v1", server.url()), "test-key")
}

fn page_query(limit: &str, page: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("state".into(), "open".into()),
        Matcher::UrlEncoded("limit".into(), limit.into()),
        Matcher::UrlEncoded("page".into(), page.into()),
    ])
}

#[tokio::test]
async fn test_get_sends_auth_and_content_type() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/repos/search")
        .match_header("authorization", "token test-key")
        .match_header("content-type", "application/json")
        .match_query(Matcher::Exact("q=my+repo&private=false".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true,"data":[{"id":1}]}"#)
        .expect(1)
        .create_async()
        .await;

    let api = GiteaApi::new().unwrap();
    let query = Query::new().param("q", "my repo").param("private", false);
    let value: Value = api
        .get(&integration(&server), "/repos/search", Some(&query))
        .await
        .unwrap();

    assert_eq!(value, json!({"ok": true, "data": [{"id": 1}]}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_non_success_uses_reason_phrase() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v1/repos/org/missing")
        .with_status(404)
        .with_body(r#"{"message":"not found"}"#)
        .create_async()
        .await;

    let api = GiteaApi::new().unwrap();
    let err = api
        .get::<Value>(&integration(&server), "/repos/org/missing", None)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Request failed: 404 Not Found");
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/repos/org/repo/issues")
        .match_header("authorization", "token test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"title": "Crash on start"})))
        .with_status(201)
        .with_body(r#"{"number":12,"title":"Crash on start"}"#)
        .create_async()
        .await;

    let api = GiteaApi::new().unwrap();
    let created: Value = api
        .post(
            &integration(&server),
            "/repos/org/repo/issues",
            &json!({"title": "Crash on start"}),
        )
        .await
        .unwrap();

    assert_eq!(created["number"], 12);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_paginated_follows_total_count_header() {
    let mut server = Server::new_async().await;
    let path = "/api/v1/repos/org/repo/issues";
    let mut mocks = Vec::new();
    for (page, body) in [("1", "[1,2]"), ("2", "[3,4]"), ("3", "[5]")] {
        mocks.push(
            server
                .mock("GET", path)
                .match_query(page_query("2", page))
                .match_header("authorization", "token test-key")
                .with_status(200)
                .with_header("X-Total-Count", "5")
                .with_body(body)
                .expect(1)
                .create_async()
                .await,
        );
    }

    let api = GiteaApi::new().unwrap();
    let query = Query::new().param("state", "open");
    let result: Paginated<u32> = api
        .get_paginated(
            &integration(&server),
            "/repos/org/repo/issues",
            Some(&query),
            Pagination::all().with_limit(2),
        )
        .await
        .unwrap();

    assert_eq!(result.items, vec![1, 2, 3, 4, 5]);
    assert_eq!(result.total, 5);
    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_paginated_without_total_header_stops() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", "/api/v1/user/repos")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_body(r#"[{"id":1},{"id":2}]"#)
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/api/v1/user/repos")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body("[]")
        .expect(0)
        .create_async()
        .await;

    let api = GiteaApi::new().unwrap();
    let result: Paginated<Value> = api
        .get_paginated(&integration(&server), "/user/repos", None, Pagination::all())
        .await
        .unwrap();

    assert_eq!(result.items.len(), 2);
    assert_eq!(result.total, 0);
    first.assert_async().await;
    second.assert_async().await;
}
