use anyhow::{Context, Result};
use fyyur_admin::{
    AdminError, AdminPage, AppConfig, ClickOutcome, HttpTransport, NavigationPolicy, Page,
    RecordingBrowser, ResourceId, ResourceKind,
};
use httpmock::prelude::*;
use std::time::Duration;

const VENUES_PAGE: &str = r#"
<!doctype html>
<html>
<body>
  <h3>San Francisco, CA</h3>
  <ul class="items">
    <li>
      <a href="/venues/42">The Musical Hop</a>
      <button class="btn btn-danger delete_item_venue" data_id="42">&cross;</button>
    </li>
    <li>
      <a href="/venues/3">Park Square Live Music &amp; Coffee</a>
      <button class="btn btn-danger delete_item_venue" data_id="3">&cross;</button>
    </li>
  </ul>
  <h3>Artists</h3>
  <ul class="items">
    <li>
      <a href="/artists/7">Guns N Petals</a>
      <button class="btn btn-danger delete_item_artist" data_id="7">&cross;</button>
    </li>
  </ul>
  <button class="btn search" data_id="42">Search</button>
</body>
</html>
"#;

fn admin_page(
    base_url: &str,
    policy: NavigationPolicy,
) -> (AdminPage<HttpTransport, RecordingBrowser>, RecordingBrowser, Page) {
    let mut config = AppConfig::default();
    config.server.base_url = base_url.to_string();
    config.navigation.policy = policy;

    let transport = HttpTransport::new(base_url, Some(Duration::from_secs(5))).unwrap();
    let browser = RecordingBrowser::new();
    let mut admin = AdminPage::new(transport, browser.clone(), &config);
    let page = Page::parse(VENUES_PAGE);
    admin.bind(&page).unwrap();

    (admin, browser, page)
}

#[tokio::test]
async fn test_venue_delete_issues_request_and_navigates() {
    let server = MockServer::start();
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/venues/42")
            .header("content-type", "application/json");
        then.status(200);
    });

    let (admin, browser, page) = admin_page(&server.base_url(), NavigationPolicy::OnSuccess);
    let trigger = admin
        .find_trigger(&page, ResourceKind::Venue, ResourceId::new(42))
        .unwrap()
        .unwrap();

    let outcome = admin.click(&trigger).await.unwrap();

    delete_mock.assert_hits(1);
    assert_eq!(
        outcome,
        ClickOutcome::Deleted {
            kind: ResourceKind::Venue,
            id: ResourceId::new(42),
            status: 200,
            redirected_to: "/venues".to_string(),
        }
    );
    assert_eq!(browser.navigations(), vec!["/venues".to_string()]);
    assert!(browser.errors().is_empty());
}

#[tokio::test]
async fn test_artist_delete_issues_request_and_navigates() -> Result<()> {
    let server = MockServer::start();
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE).path("/artists/7");
        then.status(200);
    });

    let (admin, browser, page) = admin_page(&server.base_url(), NavigationPolicy::OnSuccess);
    let trigger = page
        .query_first(".delete_item_artist")?
        .context("artist trigger should be on the page")?;

    admin.click(&trigger).await?;

    delete_mock.assert_hits(1);
    assert_eq!(browser.navigations(), vec!["/artists".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_double_click_sends_two_requests() {
    let server = MockServer::start();
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE).path("/venues/3");
        then.status(200);
    });

    let (admin, browser, page) = admin_page(&server.base_url(), NavigationPolicy::OnSuccess);
    let trigger = admin
        .find_trigger(&page, ResourceKind::Venue, ResourceId::new(3))
        .unwrap()
        .unwrap();

    admin.click(&trigger).await.unwrap();
    admin.click(&trigger).await.unwrap();

    // 沒有 debounce
    delete_mock.assert_hits(2);
    assert_eq!(browser.navigations().len(), 2);
}

#[tokio::test]
async fn test_non_trigger_element_sends_nothing() {
    let server = MockServer::start();
    let any_delete = server.mock(|when, then| {
        when.method(DELETE);
        then.status(200);
    });

    let (admin, browser, page) = admin_page(&server.base_url(), NavigationPolicy::OnSuccess);
    let search = page.query_first("button.search").unwrap().unwrap();

    let outcome = admin.click(&search).await.unwrap();

    assert_eq!(outcome, ClickOutcome::Unbound);
    any_delete.assert_hits(0);
    assert!(browser.navigations().is_empty());
}

#[tokio::test]
async fn test_server_rejection_blocks_navigation_by_default() {
    let server = MockServer::start();
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE).path("/venues/42");
        then.status(500);
    });

    let (admin, browser, page) = admin_page(&server.base_url(), NavigationPolicy::OnSuccess);
    let trigger = page.query_first(".delete_item_venue").unwrap().unwrap();

    let err = admin.click(&trigger).await.unwrap_err();

    delete_mock.assert_hits(1);
    assert!(matches!(
        err,
        AdminError::ServerRejected { status: 500, ref path } if path == "/venues/42"
    ));
    assert!(browser.navigations().is_empty());
    assert_eq!(browser.errors().len(), 1);
    assert!(browser.errors()[0].contains("500"));
}

#[tokio::test]
async fn test_always_policy_navigates_after_rejection() {
    let server = MockServer::start();
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE).path("/artists/7");
        then.status(404);
    });

    let (admin, browser, page) = admin_page(&server.base_url(), NavigationPolicy::Always);
    let trigger = page.query_first(".delete_item_artist").unwrap().unwrap();

    let outcome = admin.click(&trigger).await.unwrap();

    delete_mock.assert_hits(1);
    assert!(matches!(outcome, ClickOutcome::Deleted { status: 404, .. }));
    assert_eq!(browser.navigations(), vec!["/artists".to_string()]);
}

#[tokio::test]
async fn test_network_failure_stays_on_page() {
    // 沒有服務在 port 1 上監聽
    let (admin, browser, page) = admin_page("http://127.0.0.1:1", NavigationPolicy::Always);
    let trigger = page.query_first(".delete_item_venue").unwrap().unwrap();

    let err = admin.click(&trigger).await.unwrap_err();

    assert!(matches!(err, AdminError::NetworkFailure(_)));
    assert!(browser.navigations().is_empty());
    assert_eq!(browser.errors().len(), 1);
}

#[tokio::test]
async fn test_pages_parsed_later_are_not_bound() {
    let server = MockServer::start();
    let any_delete = server.mock(|when, then| {
        when.method(DELETE);
        then.status(200);
    });

    let (admin, _browser, _page) = admin_page(&server.base_url(), NavigationPolicy::OnSuccess);
    // 同樣的 HTML 重新解析一次，等同於之後才加進來的元素
    let later = Page::parse(VENUES_PAGE);
    let trigger = later.query_first(".delete_item_venue").unwrap().unwrap();

    assert!(!admin.binder().is_bound(&trigger));
    assert_eq!(admin.click(&trigger).await.unwrap(), ClickOutcome::Unbound);
    any_delete.assert_hits(0);
}
