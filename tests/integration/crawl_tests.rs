//! Integration tests for the crawler
//!
//! These tests use wiremock to stand up a seed directory and company
//! sites, then drive the real HTTP fetcher end-to-end. Each mock server
//! listens on its own port, which makes it a separate origin.

use career_scout::classify::CategoryKeywords;
use career_scout::config::{parse_config, Config, KeywordConfig, UserAgentConfig};
use career_scout::crawler::{
    run_scout, CompanyPipeline, CompanyRecord, Exclusion, FetchError, HttpLinkFetcher,
    LinkFetcher,
};
use career_scout::robots::PolicyGate;
use career_scout::ScoutError;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    }
}

/// Creates a test configuration pointing at the given seed page
fn create_test_config(seed_url: &str, dir: &TempDir) -> Config {
    let toml = format!(
        r#"
[crawler]
seed-url = "{seed_url}"
fetch-timeout-ms = 2000
max-concurrent-companies = 2

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"
contact-url = "https://example.com/contact"
contact-email = "test@example.com"

[output]
json-path = "{json}"
database-path = "{db}"
"#,
        seed_url = seed_url,
        json = dir.path().join("out").join("data.json").display(),
        db = dir.path().join("scout.db").display(),
    );

    parse_config(&toml).expect("test config should be valid")
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><body>{}</body></html>", body),
        "text/html; charset=utf-8",
    )
}

async fn mount_robots(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn pipeline(timeout: Duration) -> CompanyPipeline {
    let fetcher: Arc<dyn LinkFetcher> =
        Arc::new(HttpLinkFetcher::new(&user_agent(), timeout).expect("client"));
    let gate = Arc::new(PolicyGate::new(fetcher.clone(), timeout));
    let keywords = Arc::new(CategoryKeywords::from(&KeywordConfig::default()));
    CompanyPipeline::new(fetcher, gate, keywords, timeout)
}

#[tokio::test]
async fn test_full_scout_run() {
    let seed = MockServer::start().await;
    let acme = MockServer::start().await;
    let globex = MockServer::start().await;
    let initech = MockServer::start().await;

    // Acme: allowed, internship only on the careers page
    mount_robots(&acme, "User-agent: *\nAllow: /").await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<nav>
                <a href="/careers">Careers</a>
                <a href="/about-us">About</a>
                <a href="mailto:hi@acme.ee">hi@acme.ee</a>
                <a href="/contact">Kontakt</a>
            </nav>"#
                .to_string(),
        ))
        .mount(&acme)
        .await;
    Mock::given(method("GET"))
        .and(path("/careers"))
        .respond_with(html(
            r#"<a href="/careers/open">Open positions</a>
               <a href="/careers/praktika">Praktika</a>"#
                .to_string(),
        ))
        .expect(1)
        .mount(&acme)
        .await;

    // Globex: no robots.txt, so nothing else may be requested
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<a href=\"/jobs\">Jobs</a>".to_string()))
        .expect(0)
        .mount(&globex)
        .await;

    // Initech: allowed, but the homepage is broken
    mount_robots(&initech, "User-agent: *\nDisallow:").await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&initech)
        .await;

    // The directory itself is never checked against robots.txt
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /"))
        .expect(0)
        .mount(&seed)
        .await;
    Mock::given(method("GET"))
        .and(path("/members/"))
        .respond_with(html(format!(
            r#"<div id="logoslist">
                <a href="{}/en/home"><span>1. Acme AS</span></a>
                <a href="{}"><span>Globex</span></a>
                <a href="{}/"><span>Initech</span></a>
                <a href="https://www.ut.ee/"><span>University of Tartu</span></a>
            </div>
            <a href="https://outside.example/">Not a member</a>"#,
            acme.uri(),
            globex.uri(),
            initech.uri()
        )))
        .mount(&seed)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/members/", seed.uri()), &dir);
    let json_path = dir.path().join("out").join("data.json");

    let report = run_scout(config, "test-hash").await.expect("run should succeed");

    assert_eq!(report.summary.seeded, 3);
    assert_eq!(report.summary.completed, 1);
    assert_eq!(report.summary.policy_denied, 1);
    assert_eq!(report.summary.fetch_http_errors, 1);
    assert_eq!(report.summary.internship_via_fallback, 1);

    let outcome = &report.outcomes[0];
    let base = acme.uri();
    assert_eq!(outcome.company.name, "Acme AS");
    assert_eq!(outcome.company.homepage.as_str(), format!("{}/", base));
    assert_eq!(
        outcome.links.careers.as_deref(),
        Some(format!("{}/careers", base).as_str())
    );
    assert_eq!(
        outcome.links.internship.as_deref(),
        Some(format!("{}/careers/praktika", base).as_str())
    );
    assert_eq!(
        outcome.links.about.as_deref(),
        Some(format!("{}/about-us", base).as_str())
    );
    assert_eq!(
        outcome.links.contact.as_deref(),
        Some(format!("{}/contact", base).as_str())
    );

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(written.as_array().unwrap().len(), 1);
    assert_eq!(written[0]["name"], "Acme AS");
    assert_eq!(written[0]["internshipLink"], format!("{}/careers/praktika", base));

    assert!(dir.path().join("scout.db").exists());
}

#[tokio::test]
async fn test_robots_404_denies_every_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher: Arc<dyn LinkFetcher> =
        Arc::new(HttpLinkFetcher::new(&user_agent(), Duration::from_secs(2)).unwrap());
    let gate = PolicyGate::new(fetcher, Duration::from_secs(2));

    let base = server.uri();
    assert!(!gate.is_allowed(&format!("{}/", base)).await);
    assert!(!gate.is_allowed(&format!("{}/careers", base)).await);
    assert!(!gate.is_allowed(&format!("{}/anything/else?q=1", base)).await);
    assert_eq!(gate.cached_domains().await, 1);
}

#[tokio::test]
async fn test_robots_rules_are_applied_per_path() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nDisallow: /private/\n").await;

    let fetcher: Arc<dyn LinkFetcher> =
        Arc::new(HttpLinkFetcher::new(&user_agent(), Duration::from_secs(2)).unwrap());
    let gate = PolicyGate::new(fetcher, Duration::from_secs(2));

    let base = server.uri();
    assert!(gate.is_allowed(&format!("{}/", base)).await);
    assert!(gate.is_allowed(&format!("{}/careers", base)).await);
    assert!(!gate.is_allowed(&format!("{}/private/jobs", base)).await);
}

#[tokio::test]
async fn test_homepage_timeout_excludes_company() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            html("<a href=\"/careers\">Careers</a>".to_string())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let company = CompanyRecord::from_homepage("Slow Ltd", &server.uri()).unwrap();
    let result = pipeline(Duration::from_secs(1)).run(&company).await;

    assert!(matches!(
        result,
        Err(Exclusion::Fetch(FetchError::Timeout(_)))
    ));
}

#[tokio::test]
async fn test_non_html_homepage_excludes_company() {
    let server = MockServer::start().await;
    mount_robots(&server, "").await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"),
        )
        .mount(&server)
        .await;

    let company = CompanyRecord::from_homepage("Docs Inc", &server.uri()).unwrap();
    let result = pipeline(Duration::from_secs(2)).run(&company).await;

    assert!(matches!(result, Err(Exclusion::Fetch(FetchError::Parse(_)))));
}

#[tokio::test]
async fn test_direct_internship_link_skips_careers_page() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a href="/jobs">Jobs</a><a href="/students">For students</a>"#.to_string(),
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(html(String::new()))
        .expect(0)
        .mount(&server)
        .await;

    let company = CompanyRecord::from_homepage("Umbrella", &server.uri()).unwrap();
    let outcome = pipeline(Duration::from_secs(2)).run(&company).await.unwrap();

    assert_eq!(
        outcome.links.internship.as_deref(),
        Some(format!("{}/students", server.uri()).as_str())
    );
    assert!(!outcome.internship_via_fallback);
}

#[tokio::test]
async fn test_seed_fetch_failure_is_fatal() {
    let seed = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&seed)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/members/", seed.uri()), &dir);

    let result = run_scout(config, "test-hash").await;
    assert!(matches!(
        result,
        Err(ScoutError::SeedFetch {
            source: FetchError::Http(503),
            ..
        })
    ));
    assert!(!dir.path().join("out").join("data.json").exists());
}

#[tokio::test]
async fn test_empty_seed_list_is_fatal() {
    let seed = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members/"))
        .respond_with(html("<p>No members yet</p>".to_string()))
        .mount(&seed)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/members/", seed.uri()), &dir);

    let result = run_scout(config, "test-hash").await;
    assert!(matches!(result, Err(ScoutError::EmptySeedList { .. })));
}
