//! End-to-end tests: real HTTP status pages through fetch, normalize and
//! extract into one accumulated mapping.

use jboss_status::acquisition::{normalize, HttpClient, StatusSource};
use jboss_status::config::{PollConfig, Protocol, ReportMode};
use jboss_status::error::{Stage, StatusError};
use jboss_status::extraction::extract_lines;
use jboss_status::poller::Poller;
use jboss_status::report::render;
use jboss_status::ResultMapping;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STATUS_PAGE: &str = include_str!("fixtures/status_page.html");

// ─────────────────────── helpers ───────────────────────

async fn status_server(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;
    server
}

fn http_config(server: &MockServer) -> PollConfig {
    let mut config = PollConfig::new(vec![server.address().to_string()]);
    config.protocol = Protocol::Http;
    config.timeout_ms = 5_000;
    config
}

fn assert_fixture_mapping(mapping: &ResultMapping) {
    assert_eq!(mapping.len(), 2);

    let tomcat = mapping.server("http://localhost:8080").expect("http connector");
    assert_eq!(tomcat.ip, "127.0.0.1");
    assert_eq!(
        tomcat.clients.keys().collect::<Vec<_>>(),
        ["10.0.0.1", "10.0.0.2"]
    );
    assert_eq!(
        mapping
            .uris("http://localhost:8080", "10.0.0.1", "www.example.com")
            .unwrap(),
        ["GET /shop/index.jsp HTTP/1.1"]
    );
    assert_eq!(
        mapping.uris("http://localhost:8080", "10.0.0.2", "?").unwrap(),
        ["?"]
    );

    let ajp = mapping.server("ajp://node2:8009").expect("ajp connector");
    assert_eq!(ajp.ip, "10.0.0.6");
    // The request line carries an encoded slash but sits inside the window,
    // so it is recorded as a URI rather than read as a marker.
    assert_eq!(
        mapping
            .uris("ajp://node2:8009", "192.168.7.40", "intranet.example.com")
            .unwrap(),
        ["POST /login.do?user=a&amp;next=%2Fhome HTTP/1.1"]
    );
}

// ─────────────────────── pipeline ───────────────────────

#[test]
fn fixture_page_extracts_every_connector() {
    let lines = normalize(STATUS_PAGE).unwrap();
    let mut mapping = ResultMapping::new();
    let stats = extract_lines(&mut mapping, &lines).unwrap();

    assert_eq!(stats.new_servers, 2);
    assert_eq!(stats.new_clients, 3);
    assert_eq!(stats.new_uris, 3);
    assert_fixture_mapping(&mapping);
}

#[test]
fn tab_split_scenario() {
    let lines = [
        "proto=http",
        "node1\t...\tajp-worker1%2F10.0.0.5-8009",
        "x",
        "10.0.0.1",
        "a",
        "b",
        "www.example.com",
        "c",
        "d",
        "?",
    ];
    let mut mapping = ResultMapping::new();
    extract_lines(&mut mapping, lines).unwrap();

    let server = mapping.server("ajp://worker1:8009").unwrap();
    assert_eq!(server.ip, "10.0.0.5");
    assert_eq!(
        mapping.uris("ajp://worker1:8009", "10.0.0.1", "www.example.com").unwrap(),
        ["?"]
    );
}

#[test]
fn window_counts_lines_not_content() {
    // The domain is whatever sits at offset 3 and the URI at offset 6, even
    // when a hostname-looking line appears one line later.
    let lines = [
        "proto=http",
        "node1\t...\tajp-worker1%2F10.0.0.5-8009",
        "x",
        "10.0.0.1",
        "a",
        "b",
        "c",
        "www.example.com",
        "d",
        "e",
        "?",
    ];
    let mut mapping = ResultMapping::new();
    extract_lines(&mut mapping, lines).unwrap();

    assert_eq!(mapping.len(), 1);
    let server = mapping.server("ajp://worker1:8009").unwrap();
    assert_eq!(server.ip, "10.0.0.5");
    let client = &server.clients["10.0.0.1"];
    assert_eq!(client.domains.keys().collect::<Vec<_>>(), ["c"]);
    assert_eq!(mapping.uris("ajp://worker1:8009", "10.0.0.1", "c").unwrap(), ["e"]);
    assert!(mapping.uris("ajp://worker1:8009", "10.0.0.1", "www.example.com").is_none());
}

#[test]
fn report_lists_fixture_hierarchy() {
    let mut mapping = ResultMapping::new();
    extract_lines(&mut mapping, normalize(STATUS_PAGE).unwrap()).unwrap();
    let text = render(&mapping);

    let server_line = text
        .find("Internal Call Server: http://localhost:8080 at IP Address: 127.0.0.1")
        .unwrap();
    let client_line = text.find("    Query from client: 10.0.0.1").unwrap();
    let domain_line = text
        .find("        with the following virtual domain names: www.example.com")
        .unwrap();
    let uri_line = text
        .find("            for the following requests: GET /shop/index.jsp HTTP/1.1")
        .unwrap();
    assert!(server_line < client_line && client_line < domain_line && domain_line < uri_line);
    assert!(text.ends_with("NOTE: the question marks (?) are normal and expected data.\n"));
}

// ─────────────────────── over HTTP ───────────────────────

#[tokio::test]
async fn http_poll_populates_mapping() {
    let server = status_server(STATUS_PAGE).await;
    let config = http_config(&server);
    let url = config.target_urls().remove(0);

    let mut poller = Poller::new(config, HttpClient::new(5_000).unwrap());
    poller.poll_once(&url).await.unwrap();

    assert_fixture_mapping(poller.mapping());
}

#[tokio::test]
async fn repeated_polls_do_not_duplicate() {
    let server = status_server(STATUS_PAGE).await;
    let config = http_config(&server);
    let url = config.target_urls().remove(0);

    let mut poller = Poller::new(config, HttpClient::new(5_000).unwrap());
    poller.poll_once(&url).await.unwrap();
    let second = poller.poll_once(&url).await.unwrap();

    assert_eq!(second.new_uris, 0);
    assert_eq!(poller.completed_polls(), 2);
    assert_eq!(poller.mapping().uri_count(), 3);
}

#[tokio::test]
async fn server_error_is_a_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = HttpClient::new(5_000).unwrap();
    let url = format!("{}/status", server.uri());
    let err = client.fetch(&url).await.unwrap_err();
    assert!(matches!(err, StatusError::Fetch { .. }));
    assert_eq!(err.stage(), Stage::Fetch);
}

#[tokio::test]
async fn unreachable_target_is_a_fetch_failure() {
    let server = MockServer::start().await;
    let url = format!("{}/status", server.uri());
    drop(server);

    let err = HttpClient::new(2_000).unwrap().fetch(&url).await.unwrap_err();
    assert!(matches!(err, StatusError::Fetch { .. }));
}

#[tokio::test]
async fn full_status_with_unclosed_anchor_fails_to_parse() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .and(query_param("full", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><body><h1>http-localhost%2F127.0.0.1-8080</h1>\
             <p><a href=\"/status?full=true\">Complete server status</p></body></html>",
        ))
        .mount(&server)
        .await;

    let mut config = http_config(&server);
    config.mode = ReportMode::Full;
    let url = config.target_urls().remove(0);
    assert!(url.ends_with("/status?full=true"));

    let mut poller = Poller::new(config, HttpClient::new(5_000).unwrap());
    let err = poller.poll_once(&url).await.unwrap_err();
    assert_eq!(err.stage(), Stage::Normalize);
    assert!(poller.mapping().is_empty());
    assert_eq!(poller.completed_polls(), 0);
}
