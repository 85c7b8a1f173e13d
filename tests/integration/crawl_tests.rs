//! Integration tests for the thread crawler
//!
//! These tests use wiremock to serve post pages and comment fragments and
//! run the full request cycle end-to-end over HTTP.

use rat::config::{Config, CrawlerConfig, SiteConfig};
use rat::crawler::BranchFailurePolicy;
use rat::{Diagnostic, FetchError, RatError, SiteClient, TransportError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client pointed at the mock server
fn create_client(base_url: &str, branch_failure: BranchFailurePolicy) -> rat::SiteClient<rat::HttpTransport> {
    let config = Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
        },
        crawler: CrawlerConfig {
            branch_failure,
            request_timeout: 5_000,
            connect_timeout: 1_000,
            crawl_deadline: Some(20_000),
        },
        ..Config::default()
    };
    SiteClient::from_config(&config).expect("Failed to build client")
}

fn comment(id: &str, parent: &str, depth: u32, score: i64, inner: &str) -> String {
    format!(
        r#"<shreddit-comment thingid="{id}" parentid="{parent}" postid="t3_abc123" depth="{depth}" score="{score}">
             <div slot="commentMeta">
               <a href="/user/author_{id}/">author_{id}</a>
               <faceplate-timeago ts="2024-01-02T03:04:05.000000+0000"></faceplate-timeago>
             </div>
             <div id="{id}-post-rtjson-content"><p>body of {id}</p></div>
             {inner}
           </shreddit-comment>"#
    )
}

fn pointer(src: &str) -> String {
    format!(r#"<faceplate-partial loading="action" src="{src}" method="post"></faceplate-partial>"#)
}

fn post_page() -> String {
    r#"<!DOCTYPE html><html><head><title>post</title></head><body>
       <shreddit-post id="t3_abc123" post-title="Hello threads" author="op"
                      score="321" comment-count="3"
                      created-timestamp="2024-01-01T10:00:00.000000+0000"
                      subreddit-prefixed-name="r/rust">
         <div slot="text-body"><div><p>Post body line</p></div></div>
       </shreddit-post>
       </body></html>"#
        .to_string()
}

async fn mount_html(server: &MockServer, http_method: &str, route: &str, body: String, times: u64) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_post_with_lazy_branch() {
    let server = MockServer::start().await;

    mount_html(&server, "GET", "/r/rust/comments/abc123/hello/", post_page(), 1).await;

    // Root fragment: reply a with its low-score child c, plus a pointer to more replies of a
    let root = comment(
        "t1_a",
        "",
        0,
        5,
        &format!(
            "{}{}",
            comment("t1_c", "t1_a", 1, 2, ""),
            pointer("/svc/shreddit/more-comments/rust/t1_a")
        ),
    );
    mount_html(&server, "GET", "/svc/shreddit/comments/rust/abc123", root, 1).await;

    mount_html(
        &server,
        "POST",
        "/svc/shreddit/more-comments/rust/t1_a",
        comment("t1_b", "t1_a", 1, 9, ""),
        1,
    )
    .await;

    let client = create_client(&server.uri(), BranchFailurePolicy::Abort);
    let post = client
        .fetch_post("/r/rust/comments/abc123/hello/")
        .await
        .expect("Failed to load post");

    assert_eq!(post.title, "Hello threads");
    assert_eq!(post.author, "op");
    assert_eq!(post.score, 321);
    assert_eq!(post.comment_count, 3);
    assert_eq!(post.subreddit, "rust");
    assert_eq!(post.body_lines, vec!["Post body line"]);

    assert_eq!(post.comments.len(), 1);
    let a = &post.comments[0];
    assert_eq!(a.id, "t1_a");
    assert_eq!(a.author, "author_t1_a");
    assert_eq!(a.body_lines, vec!["body of t1_a"]);
    assert!(a.timestamp.is_some());

    let children: Vec<(&str, i64)> = a.children.iter().map(|c| (c.id.as_str(), c.score)).collect();
    assert_eq!(children, vec![("t1_b", 9), ("t1_c", 2)]);

    assert!(post.orphans.is_empty());
    assert!(post.diagnostics.is_empty());
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/svc/shreddit/comments/rust/abc123"))
        .and(header("user-agent", "RAT/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(comment("t1_a", "", 0, 1, "")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), BranchFailurePolicy::Abort);
    let forest = client
        .fetch_thread("/svc/shreddit/comments/rust/abc123")
        .await
        .expect("Failed to load thread");

    assert_eq!(forest.roots.len(), 1);
}

#[tokio::test]
async fn test_cyclic_branches_fetched_once() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "GET",
        "/thread/a",
        format!("{}{}", comment("t1_x", "", 0, 1, ""), pointer("/thread/b")),
        1,
    )
    .await;

    // Branch b points back at the root fragment
    mount_html(
        &server,
        "POST",
        "/thread/b",
        format!("{}{}", comment("t1_y", "t1_x", 1, 1, ""), pointer("/thread/a")),
        1,
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/thread/a"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), BranchFailurePolicy::Abort);
    let forest = client
        .fetch_thread("/thread/a")
        .await
        .expect("Failed to load thread");

    assert_eq!(forest.roots.len(), 1);
    assert_eq!(forest.roots[0].children.len(), 1);
    assert_eq!(forest.roots[0].children[0].id, "t1_y");
}

#[tokio::test]
async fn test_shared_branch_fetched_once() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "GET",
        "/thread/root",
        format!(
            "{}{}",
            comment("t1_p", "", 0, 3, &pointer("/more/one")),
            comment("t1_q", "", 0, 4, &pointer("/more/two"))
        ),
        1,
    )
    .await;
    mount_html(
        &server,
        "POST",
        "/more/one",
        format!("{}{}", comment("t1_p1", "t1_p", 1, 0, ""), pointer("/more/shared")),
        1,
    )
    .await;
    mount_html(
        &server,
        "POST",
        "/more/two",
        format!("{}{}", comment("t1_q1", "t1_q", 1, 0, ""), pointer("/more/shared")),
        1,
    )
    .await;
    mount_html(
        &server,
        "POST",
        "/more/shared",
        comment("t1_s", "t1_p1", 2, 0, ""),
        1,
    )
    .await;

    let client = create_client(&server.uri(), BranchFailurePolicy::Abort);
    let forest = client
        .fetch_thread("/thread/root")
        .await
        .expect("Failed to load thread");

    let root_ids: Vec<&str> = forest.roots.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(root_ids, vec!["t1_q", "t1_p"]);
    assert_eq!(forest.record_count(), 5);
}

#[tokio::test]
async fn test_failed_branch_aborts_by_default() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "GET",
        "/thread/root",
        format!("{}{}", comment("t1_a", "", 0, 1, ""), pointer("/more/broken")),
        1,
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/more/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), BranchFailurePolicy::Abort);
    let err = client
        .fetch_thread("/thread/root")
        .await
        .expect_err("Broken branch should fail the crawl");

    match err {
        RatError::Branch { link, source } => {
            assert!(link.ends_with("/more/broken"), "unexpected link {}", link);
            assert!(matches!(
                source,
                FetchError::Transport(TransportError::Status { status: 500, .. })
            ));
        }
        other => panic!("expected branch failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_branch_skipped_when_tolerant() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "GET",
        "/thread/root",
        format!(
            "{}{}",
            comment("t1_a", "", 0, 1, &pointer("/more/broken")),
            comment("t1_b", "", 0, 2, "")
        ),
        1,
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/more/broken"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), BranchFailurePolicy::Skip);
    let forest = client
        .fetch_thread("/thread/root")
        .await
        .expect("Tolerant crawl should succeed");

    let root_ids: Vec<&str> = forest.roots.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(root_ids, vec!["t1_b", "t1_a"]);
    assert!(forest
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::SkippedBranch { link, .. } if link.ends_with("/more/broken"))));
}

#[tokio::test]
async fn test_missing_root_fragment_is_fatal() {
    let server = MockServer::start().await;

    mount_html(&server, "GET", "/r/rust/comments/abc123/hello/", post_page(), 1).await;

    Mock::given(method("GET"))
        .and(path("/svc/shreddit/comments/rust/abc123"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), BranchFailurePolicy::Skip);
    let err = client
        .fetch_post("/r/rust/comments/abc123/hello/")
        .await
        .expect_err("Missing root fragment should fail");

    assert!(matches!(
        err,
        RatError::Root {
            source: FetchError::Transport(TransportError::Status { status: 404, .. }),
            ..
        }
    ));
}

#[tokio::test]
async fn test_page_without_post_element() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "GET",
        "/r/rust/comments/nope/gone/",
        "<html><body><p>This post was removed</p></body></html>".to_string(),
        1,
    )
    .await;

    let client = create_client(&server.uri(), BranchFailurePolicy::Abort);
    let err = client
        .fetch_post("/r/rust/comments/nope/gone/")
        .await
        .expect_err("Page without post should fail");

    assert!(matches!(err, RatError::PostNotFound { .. }));
}

#[tokio::test]
async fn test_orphans_reported_with_post() {
    let server = MockServer::start().await;

    mount_html(&server, "GET", "/r/rust/comments/abc123/hello/", post_page(), 1).await;
    mount_html(
        &server,
        "GET",
        "/svc/shreddit/comments/rust/abc123",
        format!(
            "{}{}",
            comment("t1_a", "", 0, 1, ""),
            comment("t1_lost", "t1_never_loaded", 2, 1, "")
        ),
        1,
    )
    .await;

    let client = create_client(&server.uri(), BranchFailurePolicy::Abort);
    let post = client
        .fetch_post("/r/rust/comments/abc123/hello/")
        .await
        .expect("Failed to load post");

    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.orphans.len(), 1);
    assert_eq!(post.orphans[0].id, "t1_lost");
    assert!(post.diagnostics.contains(&Diagnostic::OrphanRecord {
        id: "t1_lost".to_string(),
        parent_id: "t1_never_loaded".to_string(),
    }));
}

#[tokio::test]
async fn test_subreddit_listing() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "GET",
        "/r/rust/",
        r#"<html><body>
           <div data-testid="post-container">
             <h3>First post</h3>
             <a href="/r/rust/comments/aaa/first_post/">12 comments</a>
           </div>
           <div data-testid="post-container">
             <h3>Second post</h3>
             <a href="/r/rust/comments/bbb/second_post/">3 comments</a>
           </div>
           </body></html>"#
            .to_string(),
        1,
    )
    .await;

    let client = create_client(&server.uri(), BranchFailurePolicy::Abort);
    let listing = client
        .fetch_listing("rust")
        .await
        .expect("Failed to load listing");

    let entries: Vec<(&str, &str)> = listing
        .entries
        .iter()
        .map(|e| (e.title.as_str(), e.link.as_str()))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("First post", "/r/rust/comments/aaa/first_post/"),
            ("Second post", "/r/rust/comments/bbb/second_post/"),
        ]
    );
}
