mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_test::TestServer;
use blog_platform::domain::entities::PostStatus;
use blog_platform::infrastructure::cache::MemoryCache;
use blog_platform::routes::blog_app;
use common::days;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn server_with(blog: Arc<common::InMemoryBlog>) -> TestServer {
    let state = common::blog_state(
        blog,
        common::FakeProbe::new(true),
        Arc::new(MemoryCache::new()),
    );
    TestServer::new(common::blog_app(state)).unwrap()
}

fn titles(json: &Value) -> Vec<String> {
    json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_shows_published_posts_newest_first() {
    let blog = common::InMemoryBlog::new();
    blog.add_post("Old", "body", PostStatus::Published, 1, None, days(3));
    blog.add_post("Draft", "body", PostStatus::Draft, 1, None, days(0));
    blog.add_post("New", "body", PostStatus::Published, 1, None, days(1));
    let server = server_with(blog);

    let response = server.get("/api/posts").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["count"], 2);
    assert_eq!(titles(&json), vec!["New", "Old"]);
    assert_eq!(json["results"][0]["author"]["display_name"], "Author 1");
    assert!(json["results"][0].get("body").is_none());
}

#[tokio::test]
async fn test_list_excerpt_is_truncated() {
    let blog = common::InMemoryBlog::new();
    let long_body = "x".repeat(200);
    blog.add_post("Long", &long_body, PostStatus::Published, 1, None, days(0));
    let server = server_with(blog);

    let json = server.get("/api/posts").await.json::<Value>();

    let excerpt = json["results"][0]["excerpt"].as_str().unwrap();
    assert_eq!(excerpt, format!("{}...", "x".repeat(150)));
}

#[tokio::test]
async fn test_list_filters() {
    let blog = common::InMemoryBlog::new();
    let rust = blog.add_category("Rust", true);
    let go = blog.add_category("Go", true);
    blog.add_post(
        "Ownership explained",
        "Borrowing rules",
        PostStatus::Published,
        1,
        Some(&rust),
        days(10),
    );
    blog.add_post(
        "Goroutines",
        "Channels and OWNERSHIP of data",
        PostStatus::Published,
        2,
        Some(&go),
        days(1),
    );
    let server = server_with(blog);

    let search = server
        .get("/api/posts")
        .add_query_param("search", "ownership")
        .await
        .json::<Value>();
    assert_eq!(titles(&search), vec!["Goroutines", "Ownership explained"]);

    let by_category = server
        .get("/api/posts")
        .add_query_param("category", rust.id)
        .await
        .json::<Value>();
    assert_eq!(titles(&by_category), vec!["Ownership explained"]);

    let by_author = server
        .get("/api/posts")
        .add_query_param("author", "2")
        .await
        .json::<Value>();
    assert_eq!(titles(&by_author), vec!["Goroutines"]);

    let since = (chrono::Utc::now() - days(5)).date_naive().to_string();
    let recent = server
        .get("/api/posts")
        .add_query_param("published_after", &since)
        .await
        .json::<Value>();
    assert_eq!(titles(&recent), vec!["Goroutines"]);

    let older = server
        .get("/api/posts")
        .add_query_param("created_before", &since)
        .await
        .json::<Value>();
    assert_eq!(titles(&older), vec!["Ownership explained"]);
}

#[tokio::test]
async fn test_empty_filter_values_are_ignored() {
    let blog = common::InMemoryBlog::new();
    blog.add_post("Hello", "body", PostStatus::Published, 1, None, days(0));
    let server = server_with(blog);

    let response = server
        .get("/api/posts")
        .add_query_param("category", "")
        .add_query_param("search", "")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["count"], 1);
}

#[tokio::test]
async fn test_malformed_filters_are_rejected() {
    let server = server_with(common::InMemoryBlog::new());

    let response = server
        .get("/api/posts")
        .add_query_param("category", "abc")
        .add_query_param("published_after", "2024-13-01")
        .await;

    response.assert_status_bad_request();

    let details = &response.json::<Value>()["error"]["details"];
    assert_eq!(details["category"][0], "A valid integer is required.");
    assert_eq!(
        details["published_after"][0],
        "Enter a valid date in YYYY-MM-DD format."
    );
}

#[tokio::test]
async fn test_list_links_keep_filters() {
    let blog = common::InMemoryBlog::new();
    for i in 0..3 {
        blog.add_post(&format!("Post {i}"), "rust", PostStatus::Published, 1, None, days(i));
    }
    let server = server_with(blog);

    let json = server
        .get("/api/posts")
        .add_query_param("search", "rust")
        .add_query_param("page_size", "2")
        .add_header("Host", "blog.test")
        .await
        .json::<Value>();

    assert_eq!(
        json["next"],
        "http://blog.test/api/posts/?page=2&page_size=2&search=rust"
    );
}

#[tokio::test]
async fn test_detail_counts_views() {
    let blog = common::InMemoryBlog::new();
    let post = blog.add_post("Hello", "Full body", PostStatus::Published, 1, None, days(0));
    let server = server_with(blog.clone());

    let response = server.get(&format!("/api/posts/{}", post.id)).await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["title"], "Hello");
    assert_eq!(json["body"], "Full body");
    assert_eq!(json["views"], 1);
    assert_eq!(blog.views(post.id), 1);
}

#[tokio::test]
async fn test_cached_detail_does_not_count_again() {
    let blog = common::InMemoryBlog::new();
    let post = blog.add_post("Hello", "body", PostStatus::Published, 1, None, days(0));
    let server = server_with(blog.clone());

    let first = server.get(&format!("/api/posts/{}", post.id)).await.json::<Value>();
    let second = server.get(&format!("/api/posts/{}", post.id)).await.json::<Value>();

    assert_eq!(first, second);
    assert_eq!(blog.views(post.id), 1);
}

#[tokio::test]
async fn test_oversized_detail_is_served_but_not_cached() {
    let blog = common::InMemoryBlog::new();
    let body = "x".repeat(1024 * 1024 + 1);
    let post = blog.add_post("Big", &body, PostStatus::Published, 1, None, days(0));
    let cache = Arc::new(MemoryCache::new());
    let state = common::blog_state(blog.clone(), common::FakeProbe::new(true), cache.clone());
    let server = TestServer::new(common::blog_app(state)).unwrap();

    for expected_views in [1, 2] {
        let response = server.get(&format!("/api/posts/{}", post.id)).await;

        response.assert_status_ok();
        let json = response.json::<Value>();
        assert_eq!(json["body"].as_str().unwrap().len(), body.len());
        assert_eq!(json["views"], expected_views);
    }

    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_detail_not_found() {
    let blog = common::InMemoryBlog::new();
    let draft = blog.add_post("Draft", "body", PostStatus::Draft, 1, None, days(0));
    let server = server_with(blog.clone());

    for path in [
        format!("/api/posts/{}", draft.id),
        "/api/posts/999".to_string(),
        "/api/posts/not-a-number".to_string(),
    ] {
        let response = server.get(&path).await;
        response.assert_status_not_found();
    }

    assert_eq!(blog.views(draft.id), 0);
}

#[tokio::test]
async fn test_trailing_slash_paths_are_routed() {
    let blog = common::InMemoryBlog::new();
    let post = blog.add_post("Hello", "body", PostStatus::Published, 1, None, days(0));
    let state = common::blog_state(
        blog,
        common::FakeProbe::new(true),
        Arc::new(MemoryCache::new()),
    );

    for uri in ["/api/posts/".to_string(), format!("/api/posts/{}/", post.id)] {
        let response = blog_app(state.clone())
            .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}
