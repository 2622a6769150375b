//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use manomano_scraper::config::{
    Config, CrawlerConfig, OutputConfig, OutputFormat, ProxyConfig, SeedConfig,
};
use manomano_scraper::crawler::{
    build_http_client, crawl, fetch_page, Coordinator, FetchResult, RetryPolicy,
};
use manomano_scraper::output::JsonLinesSink;
use manomano_scraper::seeds::SeedEntry;
use manomano_scraper::spider::{FetchRequest, Stage};
use manomano_scraper::storage::SqliteSink;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Listing markup: pagination "1 2 3 ›" and three product cards, one offsite
const LISTING_PAGE: &str = r#"<html><body>
    <div class="product-list__product product-card js-product-card"><a href="/p/scie-a">A</a></div>
    <div class="product-list__product product-card js-product-card"><a href="/p/scie-b">B</a></div>
    <div class="product-list__product product-card js-product-card"><a href="https://www.leroymerlin.fr/p/x">X</a></div>
    <nav>
      <a class="pagination__link js-listing__trigger" href="?page=1">1</a>
      <a class="pagination__link js-listing__trigger" href="?page=2">2</a>
      <a class="pagination__link js-listing__trigger" href="?page=3"> 3 </a>
      <a class="pagination__link js-listing__trigger" href="?page=2">›</a>
    </nav>
</body></html>"#;

const PRODUCT_PAGE: &str = r#"<html><body>
    <div data-flix-ean="3165140512345"></div>
    <ul class="breadcrumbs product__breadcrumbs-top">
      <li><a href="/"><span>Accueil</span></a></li>
      <li><a href="/bricolage"><span> Outillage </span></a></li>
    </ul>
    <h1 class="product-info__name">Scie sauteuse 650W</h1>
    <span itemprop="brand">Makita</span>
    <div class="product__images">
      <div data-image="https://cdn.example.com/1.jpg"></div>
      <div data-image="https://cdn.example.com/2.jpg"></div>
    </div>
    <div class="product-section__content product-section__content--padding">
      <p>Coupe   droite.</p>
    </div>
</body></html>"#;

/// Creates a test configuration crawling only the mock server
fn create_test_config(server: &MockServer, seeds: Vec<String>, output: OutputConfig) -> Config {
    Config {
        crawler: CrawlerConfig {
            base_url: server.uri(),
            allowed_domains: vec!["127.0.0.1".to_string()],
            concurrent_requests: 4,
            max_retries: 2,
            request_timeout: 5,
            ..CrawlerConfig::default()
        },
        proxy: ProxyConfig::default(),
        seeds: SeedConfig {
            database_path: None,
            table: "manomano_category".to_string(),
            urls: seeds,
        },
        output,
    }
}

async fn mount_html(server: &MockServer, route: &str, body: &str, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_category() {
    let mock_server = MockServer::start().await;

    // Category page plus three listing pages share the path
    mount_html(&mock_server, "/cat/scie-sauteuse-", LISTING_PAGE, 4).await;
    mount_html(&mock_server, "/p/scie-a", PRODUCT_PAGE, 1).await;

    // Blocked product: first attempt plus two retries, then handed to the spider
    Mock::given(method("GET"))
        .and(path("/p/scie-b"))
        .respond_with(ResponseTemplate::new(403))
        .expect(3)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("products.db");
    let config = create_test_config(
        &mock_server,
        vec![],
        OutputConfig {
            format: OutputFormat::Sqlite,
            path: db_path.to_string_lossy().into_owned(),
        },
    );

    let seeds = vec![SeedEntry {
        url: format!("{}/cat/scie-sauteuse-", mock_server.uri()),
    }];

    let sink = SqliteSink::new(&db_path).unwrap();
    let mut coordinator = Coordinator::new(&config, Box::new(sink)).unwrap();
    let stats = coordinator.run(&seeds, 0, 1, "hash").await.unwrap();

    assert_eq!(stats.category_requests, 1);
    assert_eq!(stats.page_requests, 3);
    assert_eq!(stats.product_requests, 2);
    assert_eq!(stats.duplicates_filtered, 4);
    assert_eq!(stats.offsite_filtered, 3);
    assert_eq!(stats.retries, 2);
    assert_eq!(stats.pages_parsed, 6);
    assert_eq!(stats.records, 2);

    let storage = SqliteSink::new(&db_path).unwrap();
    let run = storage.get_run(1).unwrap();
    assert_eq!(run.config_hash, "hash");
    assert_eq!(run.records, 2);

    let records = storage.load_records(1).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.category == "scie-sauteuse"));

    let full = records
        .iter()
        .find(|r| r.ean.is_some())
        .expect("record from the product page");
    assert_eq!(full.ean.as_deref(), Some("3165140512345"));
    assert_eq!(full.title.as_deref(), Some("Scie sauteuse 650W"));
    assert_eq!(full.breadcrumb, "Accueil > Outillage");
    assert_eq!(full.description.as_deref(), Some("Coupe droite."));
    assert_eq!(
        full.images,
        vec!["https://cdn.example.com/1.jpg", "https://cdn.example.com/2.jpg"]
    );
    assert_eq!(full.brand.as_deref(), Some("Makita"));

    let blocked = records
        .iter()
        .find(|r| r.ean.is_none())
        .expect("record from the blocked page");
    assert_eq!(blocked.title, None);
    assert_eq!(blocked.breadcrumb, "");
    assert!(blocked.images.is_empty());
}

#[tokio::test]
async fn test_crawl_only_fetches_seed_slice() {
    let mock_server = MockServer::start().await;

    // No pagination block: two listing pages by default
    let listing = r#"<div class="product-list__product product-card js-product-card"><a href="/p/marteau">M</a></div>"#;
    mount_html(&mock_server, "/cat/outil-", "<html></html>", 0).await;
    mount_html(&mock_server, "/cat/marteau-", listing, 3).await;
    mount_html(&mock_server, "/cat/pince-", "<html></html>", 0).await;
    mount_html(&mock_server, "/p/marteau", PRODUCT_PAGE, 1).await;

    let temp_dir = TempDir::new().unwrap();
    let out_path = temp_dir.path().join("products.jsonl");
    let seeds = ["/cat/outil-", "/cat/marteau-", "/cat/pince-"]
        .iter()
        .map(|route| format!("{}{}", mock_server.uri(), route))
        .collect();
    let config = create_test_config(
        &mock_server,
        seeds,
        OutputConfig {
            format: OutputFormat::Jsonl,
            path: out_path.to_string_lossy().into_owned(),
        },
    );

    let stats = crawl(&config, "hash", 1, 2).await.unwrap();
    assert_eq!(stats.category_requests, 1);
    assert_eq!(stats.page_requests, 2);
    assert_eq!(stats.records, 1);

    let content = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);

    let item: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(item["category"], "marteau");
    assert_eq!(item["ariane"], "Accueil > Outillage");
    assert_eq!(item["image_url_0"], "https://cdn.example.com/1.jpg");
    assert_eq!(item["image_url_1"], "https://cdn.example.com/2.jpg");
    assert!(item.get("image_url_2").is_none());
}

#[tokio::test]
async fn test_unhandled_status_is_dropped() {
    let mock_server = MockServer::start().await;

    let listing = r#"<div class="product-list__product product-card js-product-card"><a href="/p/gone">G</a></div>"#;
    mount_html(&mock_server, "/cat/perceuse-", listing, 3).await;
    Mock::given(method("GET"))
        .and(path("/p/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let out_path = temp_dir.path().join("products.jsonl");
    let config = create_test_config(
        &mock_server,
        vec![],
        OutputConfig {
            format: OutputFormat::Jsonl,
            path: out_path.to_string_lossy().into_owned(),
        },
    );
    let seeds = vec![SeedEntry {
        url: format!("{}/cat/perceuse-", mock_server.uri()),
    }];

    let sink = JsonLinesSink::new(&out_path).unwrap();
    let mut coordinator = Coordinator::new(&config, Box::new(sink)).unwrap();
    let stats = coordinator.run(&seeds, 0, 5, "hash").await.unwrap();

    assert_eq!(stats.product_requests, 1);
    assert_eq!(stats.duplicates_filtered, 1);
    assert_eq!(stats.responses_dropped, 1);
    assert_eq!(stats.retries, 0);
    assert_eq!(stats.records, 0);

    let content = std::fs::read_to_string(&out_path).unwrap();
    assert!(content.is_empty());
}

#[tokio::test]
async fn test_requests_go_through_authenticated_proxy() {
    let proxy_server = MockServer::start().await;

    // API key as basic-auth user, empty password: base64("key:")
    Mock::given(method("GET"))
        .and(path("/p/perceuse-1"))
        .and(header("proxy-authorization", "Basic a2V5Og=="))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .expect(1)
        .mount(&proxy_server)
        .await;

    let proxy = ProxyConfig {
        enabled: true,
        url: proxy_server.uri(),
        api_key: "key".to_string(),
    };
    let client = build_http_client(&CrawlerConfig::default(), &proxy).unwrap();

    let request = FetchRequest::new(
        "http://www.manomano.fr/p/perceuse-1",
        "http://www.manomano.fr/cat/perceuse-",
        Stage::Product,
    );
    match fetch_page(&client, request, &RetryPolicy::new(vec![], 0)).await {
        FetchResult::Success(page) => {
            assert_eq!(page.status, 200);
            assert!(page.body.contains("3165140512345"));
        }
        other => panic!("expected the proxied page, got {:?}", other),
    }
}
