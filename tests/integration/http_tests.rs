use crawl_bench::config::FetcherConfig;
use crawl_bench::crawler::{crawl, CrawlContext, HtmlLinkExtractor, HttpFetcher};
use crawl_bench::Strategy;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts `/` linking to `/page1`, `/page2` and a missing page, with
/// `/page2` linking back to `/`
async fn mount_site(server: &MockServer) {
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="{base}/page1">Page 1</a>
            <a href="/page2">Page 2</a>
            <a href="/missing">Missing</a>
            <a href="mailto:someone@example.com">Mail</a>
            </body></html>"#
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><title>Page 1</title></head><body>Content 1</body></html>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><title>Page 2</title></head><body><a href="/">Home</a></body></html>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

fn http_context() -> CrawlContext {
    let fetcher = HttpFetcher::new(&FetcherConfig {
        timeout_secs: 5,
        user_agent: "TestBench/1.0".to_string(),
    })
    .unwrap();
    CrawlContext::new(Arc::new(fetcher), Arc::new(HtmlLinkExtractor))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_crawl_over_http() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let seed = format!("{}/", server.uri());
    let ctx = http_context();

    for strategy in Strategy::all(4) {
        let result = crawl(&ctx, strategy, &seed, 10).await.unwrap();

        let expected = match strategy {
            Strategy::Cooperative { .. } => 4,
            _ => 3,
        };
        assert_eq!(result.pages_crawled, expected, "{}", strategy);
    }

    // Every strategy requested each page exactly once
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 12);
    for page in ["/", "/page1", "/page2", "/missing"] {
        let hits = requests.iter().filter(|r| r.url.path() == page).count();
        assert_eq!(hits, 3, "{}", page);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_budget_of_one_over_http() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let seed = format!("{}/", server.uri());
    let ctx = http_context();

    let result = crawl(&ctx, Strategy::Sequential, &seed, 1).await.unwrap();

    assert_eq!(result.pages_crawled, 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
