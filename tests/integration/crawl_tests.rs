//! Integration tests for the crawler
//!
//! These tests use wiremock to serve search result pages and drive the full
//! Discover → Page → Stop cycle end-to-end. Page fetch counts are verified by
//! wiremock's `expect` when each mock server drops.

use bazos_scout::config::Config;
use bazos_scout::crawler::{Coordinator, LogProgress, NoProgress};
use bazos_scout::output::ListingCollection;
use bazos_scout::query::SearchSpec;
use bazos_scout::search::{run_search, search_json, SearchRequest};
use bazos_scout::ScoutError;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches on the `crz` page offset; `None` means the parameter is absent
struct Offset(Option<u64>);

impl Match for Offset {
    fn matches(&self, request: &Request) -> bool {
        let crz = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "crz")
            .map(|(_, value)| value.into_owned());
        crz == self.0.map(|offset| offset.to_string())
    }
}

/// Matches any paged request
struct AnyOffset;

impl Match for AnyOffset {
    fn matches(&self, request: &Request) -> bool {
        request.url.query_pairs().any(|(key, _)| key == "crz")
    }
}

fn listing_html(id: u64) -> String {
    format!(
        r#"<div class="inzeraty inzeratyflex">
            <a href="https://pc.bazos.cz/inzerat/{id}/ryzen.php"><img src="https://www.bazos.cz/img/1t/{id}.jpg"></a>
            <h2 class="nadpis"><a href="https://pc.bazos.cz/inzerat/{id}/ryzen.php">Ryzen {id}</a></h2>
            <span class="velikost10"> - [5.10. 2024]</span>
            <div class="popis">Procesor číslo {id}</div>
            <div class="inzeratycena"><b>{price} Kč</b></div>
            <div class="inzeratylok">Brno<br>602 00</div>
            <div class="inzeratyview">{views} x</div>
        </div>"#,
        id = id,
        price = 5000 + id * 10,
        views = id + 1
    )
}

/// A results page reporting `total` results and holding listings `ids`
fn results_page(total: u64, ids: std::ops::Range<u64>) -> String {
    let listings: String = ids.clone().map(listing_html).collect();
    format!(
        r#"<html><head><meta charset="utf-8"><title>Bazoš</title></head><body>
        <div class="inzeratynadpis">Zobrazeno {}-{} inzerátů z {}</div>
        {}
        </body></html>"#,
        ids.start + 1,
        ids.end,
        total,
        listings
    )
}

fn page_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

async fn mount_discover(server: &MockServer, total: u64) {
    Mock::given(method("GET"))
        .and(path("/search.php"))
        .and(Offset(None))
        .respond_with(page_response(results_page(total, 0..total.min(20))))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, total: u64, offset: u64, ids: std::ops::Range<u64>) {
    Mock::given(method("GET"))
        .and(path("/search.php"))
        .and(Offset(Some(offset)))
        .respond_with(page_response(results_page(total, ids)))
        .expect(1)
        .mount(server)
        .await;
}

async fn forbid_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(AnyOffset)
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

fn coordinator_for(server: &MockServer) -> Coordinator {
    let mut config = Config::default();
    config.site.search_url = format!("{}/search.php", server.uri());
    Coordinator::new(&config).expect("Failed to create coordinator")
}

fn links(listings: &ListingCollection) -> Vec<String> {
    listings.iter().map(|l| l.link.clone()).collect()
}

#[tokio::test]
async fn test_end_to_end_capped_search() {
    let mock_server = MockServer::start().await;

    // Discovery must carry the search parameters but no offset
    Mock::given(method("GET"))
        .and(path("/search.php"))
        .and(Offset(None))
        .and(query_param("hledat", "Ryzen"))
        .and(query_param("hlokalita", "Brno"))
        .and(query_param("humkreis", "25"))
        .and(query_param("cenaod", "5000"))
        .and(query_param("cenado", "20000"))
        .and(query_param("Submit", "Hledat"))
        .respond_with(page_response(results_page(237, 0..20)))
        .expect(1)
        .mount(&mock_server)
        .await;

    for page in 0..5 {
        mount_page(&mock_server, 237, page * 20, page * 20..page * 20 + 20).await;
    }
    // the sixth page must never be requested
    Mock::given(method("GET"))
        .and(Offset(Some(100)))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .named("sixth page")
        .mount(&mock_server)
        .await;

    let mut spec = SearchSpec::new("Ryzen");
    spec.location = Some("Brno".to_string());
    spec.min_price = Some(5000);
    spec.max_price = Some(20000);
    spec.limit = Some(100);

    let coordinator = coordinator_for(&mock_server);
    let progress = LogProgress::default();
    let listings = coordinator
        .crawl(&spec, &progress)
        .await
        .expect("Crawl failed");

    assert_eq!(listings.len(), 100);
    assert_eq!(progress.done(), 100);
    assert_eq!(
        listings.as_slice()[0].link,
        "https://pc.bazos.cz/inzerat/0/ryzen.php"
    );
    assert_eq!(
        listings.as_slice()[99].link,
        "https://pc.bazos.cz/inzerat/99/ryzen.php"
    );

    let first = &listings.as_slice()[0];
    assert_eq!(first.price, 5000);
    assert_eq!(first.currency, "Kč");
    assert_eq!(first.location, "Brno");
    assert_eq!(first.post_code, "602 00");
    assert_eq!(first.added, "5.10.2024");
    assert_eq!(first.views, 1);
    assert_eq!(first.description, "Procesor číslo 0");
}

#[tokio::test]
async fn test_uncapped_search_fetches_every_page() {
    let mock_server = MockServer::start().await;

    mount_discover(&mock_server, 45).await;
    mount_page(&mock_server, 45, 0, 0..20).await;
    mount_page(&mock_server, 45, 20, 20..40).await;
    mount_page(&mock_server, 45, 40, 40..45).await;

    let coordinator = coordinator_for(&mock_server);
    let listings = coordinator
        .crawl(&SearchSpec::new("Ryzen"), &NoProgress)
        .await
        .expect("Crawl failed");

    assert_eq!(listings.len(), 45);
    let expected: Vec<String> = (0..45)
        .map(|id| format!("https://pc.bazos.cz/inzerat/{}/ryzen.php", id))
        .collect();
    assert_eq!(links(&listings), expected);
}

#[tokio::test]
async fn test_cap_smaller_than_page_stops_mid_page() {
    let mock_server = MockServer::start().await;

    mount_discover(&mock_server, 45).await;
    mount_page(&mock_server, 45, 0, 0..20).await;
    Mock::given(method("GET"))
        .and(Offset(Some(20)))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut spec = SearchSpec::new("Ryzen");
    spec.limit = Some(10);

    let coordinator = coordinator_for(&mock_server);
    let listings = coordinator
        .crawl(&spec, &NoProgress)
        .await
        .expect("Crawl failed");

    assert_eq!(listings.len(), 10);
    assert_eq!(
        listings.as_slice()[9].link,
        "https://pc.bazos.cz/inzerat/9/ryzen.php"
    );
}

#[tokio::test]
async fn test_zero_cap_fetches_nothing_after_discovery() {
    let mock_server = MockServer::start().await;

    mount_discover(&mock_server, 45).await;
    forbid_pages(&mock_server).await;

    let mut spec = SearchSpec::new("Ryzen");
    spec.limit = Some(0);

    let coordinator = coordinator_for(&mock_server);
    let listings = coordinator
        .crawl(&spec, &NoProgress)
        .await
        .expect("Crawl failed");

    assert!(listings.is_empty());
}

#[tokio::test]
async fn test_zero_results_fetches_nothing_after_discovery() {
    let mock_server = MockServer::start().await;

    mount_discover(&mock_server, 0).await;
    forbid_pages(&mock_server).await;

    let coordinator = coordinator_for(&mock_server);
    let listings = coordinator
        .crawl(&SearchSpec::new("nic takového"), &NoProgress)
        .await
        .expect("Crawl failed");

    assert!(listings.is_empty());
}

#[tokio::test]
async fn test_short_page_is_tolerated() {
    let mock_server = MockServer::start().await;

    mount_discover(&mock_server, 45).await;
    mount_page(&mock_server, 45, 0, 0..20).await;
    // the site removed listings between requests
    mount_page(&mock_server, 45, 20, 20..32).await;
    mount_page(&mock_server, 45, 40, 40..45).await;

    let coordinator = coordinator_for(&mock_server);
    let listings = coordinator
        .crawl(&SearchSpec::new("Ryzen"), &NoProgress)
        .await
        .expect("Crawl failed");

    assert_eq!(listings.len(), 37);
    assert_eq!(
        listings.as_slice()[32].link,
        "https://pc.bazos.cz/inzerat/40/ryzen.php"
    );
}

#[tokio::test]
async fn test_start_offset_shifts_pages() {
    let mock_server = MockServer::start().await;

    mount_discover(&mock_server, 45).await;
    mount_page(&mock_server, 45, 20, 20..40).await;
    mount_page(&mock_server, 45, 40, 40..45).await;
    Mock::given(method("GET"))
        .and(Offset(Some(0)))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut spec = SearchSpec::new("Ryzen");
    spec.start = Some(20);

    let coordinator = coordinator_for(&mock_server);
    let listings = coordinator
        .crawl(&spec, &NoProgress)
        .await
        .expect("Crawl failed");

    assert_eq!(listings.len(), 25);
    assert_eq!(
        listings.as_slice()[0].link,
        "https://pc.bazos.cz/inzerat/20/ryzen.php"
    );
}

#[tokio::test]
async fn test_missing_result_count_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(Offset(None))
        .respond_with(page_response(format!(
            "<html><body>{}</body></html>",
            listing_html(1)
        )))
        .expect(1)
        .mount(&mock_server)
        .await;
    forbid_pages(&mock_server).await;

    let coordinator = coordinator_for(&mock_server);
    let err = coordinator
        .crawl(&SearchSpec::new("Ryzen"), &NoProgress)
        .await
        .unwrap_err();

    assert!(err.is_parse());
    assert!(matches!(
        err,
        ScoutError::Parse(bazos_scout::ParseError::MissingResultCount { .. })
    ));
}

#[tokio::test]
async fn test_discovery_http_error_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let coordinator = coordinator_for(&mock_server);
    let err = coordinator
        .crawl(&SearchSpec::new("Ryzen"), &NoProgress)
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(
        err,
        ScoutError::Transport(bazos_scout::TransportError::Status { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_page_failure_discards_partial_results() {
    let mock_server = MockServer::start().await;

    mount_discover(&mock_server, 45).await;
    mount_page(&mock_server, 45, 0, 0..20).await;
    Mock::given(method("GET"))
        .and(Offset(Some(20)))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(Offset(Some(40)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let coordinator = coordinator_for(&mock_server);
    let result = coordinator
        .crawl(&SearchSpec::new("Ryzen"), &NoProgress)
        .await;

    assert!(matches!(result, Err(ref e) if e.is_transport()));
}

#[tokio::test]
async fn test_invalid_utf8_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x3c, 0x68, 0xff, 0xfe, 0x3e]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let coordinator = coordinator_for(&mock_server);
    let err = coordinator
        .crawl(&SearchSpec::new("Ryzen"), &NoProgress)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ScoutError::Parse(bazos_scout::ParseError::Encoding { .. })
    ));
}

#[tokio::test]
async fn test_malformed_listing_degrades_to_defaults() {
    let mock_server = MockServer::start().await;

    let page = r#"<html><body>
        <div class="inzeratynadpis">Zobrazeno 1-2 inzerátů z 2</div>
        <div class="inzeraty inzeratyflex">
            <h2><a href="https://pc.bazos.cz/inzerat/7/deska.php">Deska</a></h2>
            <div class="inzeratycena">V textu</div>
        </div>
        <div class="inzeraty inzeratyflex"></div>
    </body></html>"#;

    mount_discover(&mock_server, 2).await;
    Mock::given(method("GET"))
        .and(Offset(Some(0)))
        .respond_with(page_response(page.to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let coordinator = coordinator_for(&mock_server);
    let listings = coordinator
        .crawl(&SearchSpec::new("deska"), &NoProgress)
        .await
        .expect("Crawl failed");

    assert_eq!(listings.len(), 2);
    let first = &listings.as_slice()[0];
    assert_eq!(first.link, "https://pc.bazos.cz/inzerat/7/deska.php");
    assert_eq!(first.price, 0);
    assert_eq!(first.currency, "V textu");
    assert_eq!(first.img_link, "");
    assert_eq!(first.views, 0);
    assert_eq!(listings.as_slice()[1], bazos_scout::Listing::default());
}

#[tokio::test]
async fn test_concurrent_searches_are_independent() {
    let first_server = MockServer::start().await;
    mount_discover(&first_server, 30).await;
    mount_page(&first_server, 30, 0, 0..20).await;
    mount_page(&first_server, 30, 20, 20..30).await;

    let second_server = MockServer::start().await;
    mount_discover(&second_server, 5).await;
    mount_page(&second_server, 5, 0, 100..105).await;

    let first = coordinator_for(&first_server);
    let second = coordinator_for(&second_server);

    let (a, b) = tokio::join!(
        run_search(&first, SearchRequest::new("Ryzen"), Arc::new(NoProgress)),
        run_search(&second, SearchRequest::new("Intel"), Arc::new(NoProgress)),
    );

    let a = a.expect("First search failed");
    let b = b.expect("Second search failed");
    assert_eq!(a.len(), 30);
    assert_eq!(b.len(), 5);
    assert_eq!(
        b.as_slice()[0].link,
        "https://pc.bazos.cz/inzerat/100/ryzen.php"
    );
}

#[tokio::test]
async fn test_search_json_round_trip() {
    let mock_server = MockServer::start().await;

    mount_discover(&mock_server, 3).await;
    mount_page(&mock_server, 3, 0, 0..3).await;

    let coordinator = coordinator_for(&mock_server);
    let mut request = SearchRequest::new("Ryzen");
    request.results_limit = Some(50);

    let json = search_json(&coordinator, request, Arc::new(NoProgress), true)
        .await
        .expect("Search failed");

    assert!(json.contains("Procesor číslo 2"));
    let decoded = ListingCollection::from_json(&json).expect("Invalid JSON");
    assert_eq!(decoded.len(), 3);
    assert_eq!(
        links(&decoded),
        vec![
            "https://pc.bazos.cz/inzerat/0/ryzen.php".to_string(),
            "https://pc.bazos.cz/inzerat/1/ryzen.php".to_string(),
            "https://pc.bazos.cz/inzerat/2/ryzen.php".to_string(),
        ]
    );
    assert_eq!(decoded.as_slice()[2].price, 5020);
}
