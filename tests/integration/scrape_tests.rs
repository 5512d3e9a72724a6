//! End-to-end scrape tests
//!
//! These tests use wiremock to serve a small catalogue and run the full
//! discovery → pagination → extraction → output cycle against it.

use crate::fixtures::*;
use catalogue_scraper::crawler::Scraper;
use catalogue_scraper::extract::CSV_HEADERS;
use catalogue_scraper::output::RunReport;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves one "Poetry" category: page 1 has two items and a next link,
/// page 2 has one item and no next link.
async fn mount_two_page_catalogue(server: &MockServer) {
    mount_html(server, "/", root_page(&[("Poetry", POETRY_PATH)])).await;
    mount_html(
        server,
        POETRY_PATH,
        listing_page(&["a-light-in-the-attic_1000", "tipping-the-velvet_999"], Some("page-2.html")),
    )
    .await;
    mount_html(
        server,
        "/catalogue/category/books/poetry_23/page-2.html",
        listing_page(&["soumission_998"], None),
    )
    .await;

    mount_item(server, "a-light-in-the-attic_1000", "A Light in the Attic", "Poetry").await;
    mount_item(server, "tipping-the-velvet_999", "Tipping the Velvet", "Poetry").await;
    mount_item(server, "soumission_998", "Soumission: A Novel", "Poetry").await;
}

fn read_rows(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open CSV");
    let headers = reader
        .headers()
        .expect("Failed to read headers")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("Bad CSV row").iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

#[tokio::test]
async fn test_full_scrape_two_pages() {
    let mock_server = MockServer::start().await;
    mount_two_page_catalogue(&mock_server).await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/media/cache/.+\.jpg$"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]))
        .expect(3)
        .mount(&mock_server)
        .await;

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(&mock_server.uri(), output.path());

    let scraper = Scraper::new(config).expect("Failed to create scraper");
    let report = scraper.run().await.expect("Scrape failed");

    assert_eq!(report.categories.len(), 1);
    let poetry = &report.categories[0];
    assert_eq!(poetry.pages, 2);
    assert_eq!(poetry.items_found, 3);
    assert_eq!(poetry.items_written, 3);
    assert_eq!(poetry.images_downloaded, 3);
    assert!(poetry.is_clean());

    let csv_path = output.path().join("Poetry").join("Poetry.csv");
    assert_eq!(poetry.csv_path.as_deref(), Some(csv_path.as_path()));

    let (headers, rows) = read_rows(&csv_path);
    assert_eq!(headers, CSV_HEADERS.to_vec());
    assert_eq!(rows.len(), 3);

    // Page order, then in-page order
    let titles: Vec<&str> = rows.iter().map(|r| r[1].as_str()).collect();
    assert_eq!(
        titles,
        vec!["A Light in the Attic", "Tipping the Velvet", "Soumission: A Novel"]
    );

    let first = &rows[0];
    assert_eq!(
        first[0],
        format!("{}/catalogue/a-light-in-the-attic_1000/index.html", mock_server.uri())
    );
    assert_eq!(first[2], "About A Light in the Attic.");
    assert_eq!(first[3], "Poetry");
    assert_eq!(first[4], "upc-a-light-in-the-attic_1000");
    assert_eq!(first[5], "10.00");
    assert_eq!(first[6], "12.00");
    assert_eq!(first[7], "4");
    assert_eq!(first[8], "3");
    assert_eq!(
        first[9],
        format!("{}/media/cache/a-light-in-the-attic_1000.jpg", mock_server.uri())
    );

    let folder = output.path().join("Poetry");
    assert!(folder.join("a-light-in-the-attic.jpg").is_file());
    assert!(folder.join("tipping-the-velvet.jpg").is_file());
    assert!(folder.join("soumission.jpg").is_file());
    assert_eq!(
        std::fs::read(folder.join("soumission.jpg")).unwrap(),
        vec![0xFF, 0xD8, 0xFF, 0xE0]
    );

    // Wiremock verifies the three image requests when mock_server drops
}

#[tokio::test]
async fn test_broken_item_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, "/", root_page(&[("Travel", TRAVEL_PATH)])).await;
    mount_html(
        &mock_server,
        TRAVEL_PATH,
        listing_page(&["good_1", "broken_2", "gone_3"], None),
    )
    .await;
    mount_item(&mock_server, "good_1", "Good Book", "Travel").await;

    // No heading, so the page cannot produce a record
    mount_html(
        &mock_server,
        "/catalogue/broken_2/index.html",
        "<html><body><p>Nothing here</p></body></html>".to_string(),
    )
    .await;

    // Not retried: 404 is not transient
    Mock::given(method("GET"))
        .and(path("/catalogue/gone_3/index.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = create_test_config(&mock_server.uri(), output.path());
    config.output.download_images = false;

    let report = Scraper::new(config)
        .expect("Failed to create scraper")
        .run()
        .await
        .expect("Scrape failed");

    let travel = &report.categories[0];
    assert_eq!(travel.items_found, 3);
    assert_eq!(travel.items_written, 1);
    assert_eq!(travel.item_failures.len(), 2);
    assert!(travel.item_failures[0].url.ends_with("/catalogue/broken_2/index.html"));
    assert!(travel.item_failures[1].reason.contains("404"));
    assert!(travel.error.is_none());

    let (_, rows) = read_rows(&output.path().join("Travel").join("Travel.csv"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], "Good Book");
}

#[tokio::test]
async fn test_failed_image_keeps_row() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, "/", root_page(&[("Travel", TRAVEL_PATH)])).await;
    mount_html(&mock_server, TRAVEL_PATH, listing_page(&["lonely_1"], None)).await;
    mount_item(&mock_server, "lonely_1", "Lonely Planet", "Travel").await;

    Mock::given(method("GET"))
        .and(path("/media/cache/lonely_1.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(&mock_server.uri(), output.path());

    let report = Scraper::new(config)
        .expect("Failed to create scraper")
        .run()
        .await
        .expect("Scrape failed");

    let travel = &report.categories[0];
    assert_eq!(travel.items_written, 1);
    assert_eq!(travel.images_downloaded, 0);
    assert_eq!(travel.image_failures.len(), 1);
    assert!(report.has_failures());

    let (_, rows) = read_rows(&output.path().join("Travel").join("Travel.csv"));
    assert_eq!(rows.len(), 1);
    assert!(!output.path().join("Travel").join("lonely-planet.jpg").exists());
}

#[tokio::test]
async fn test_failing_category_does_not_stop_run() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/",
        root_page(&[("Poetry", POETRY_PATH), ("Travel", TRAVEL_PATH)]),
    )
    .await;

    // Poetry's listing keeps failing: 1 attempt + 2 retries, then abort
    Mock::given(method("GET"))
        .and(path(POETRY_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    mount_html(&mock_server, TRAVEL_PATH, listing_page(&["trip_1"], None)).await;
    mount_item(&mock_server, "trip_1", "Trip", "Travel").await;

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = create_test_config(&mock_server.uri(), output.path());
    config.output.download_images = false;

    let report: RunReport = Scraper::new(config)
        .expect("Failed to create scraper")
        .run()
        .await
        .expect("Scrape failed");

    assert_eq!(report.categories.len(), 2);
    let poetry = &report.categories[0];
    assert!(poetry.is_aborted());
    assert!(poetry.csv_path.is_none());
    assert!(poetry.error.as_deref().unwrap_or_default().contains("3 attempts"));

    let travel = &report.categories[1];
    assert!(!travel.is_aborted());
    assert_eq!(travel.items_written, 1);
    assert_eq!(report.aborted_categories().count(), 1);
}

#[tokio::test]
async fn test_discovery_failure_aborts_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(&mock_server.uri(), output.path());

    let result = Scraper::new(config)
        .expect("Failed to create scraper")
        .run()
        .await;

    assert!(matches!(
        result,
        Err(catalogue_scraper::ScrapeError::Fetch(
            catalogue_scraper::FetchError::Exhausted { attempts: 3, .. }
        ))
    ));
}

#[tokio::test]
async fn test_category_filter_and_summary() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/",
        root_page(&[("Poetry", POETRY_PATH), ("Travel", TRAVEL_PATH)]),
    )
    .await;

    // Filtered out, so never requested
    Mock::given(method("GET"))
        .and(path(POETRY_PATH))
        .respond_with(html(listing_page(&[], None)))
        .expect(0)
        .mount(&mock_server)
        .await;

    mount_html(&mock_server, TRAVEL_PATH, listing_page(&["trip_1"], None)).await;
    mount_item(&mock_server, "trip_1", "Trip", "Travel").await;

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let summary_path = output.path().join("summary.md");
    let mut config = create_test_config(&mock_server.uri(), output.path());
    config.site.categories = vec!["travel".to_string()];
    config.output.download_images = false;
    config.output.summary_path = Some(summary_path.display().to_string());

    let report = Scraper::new(config)
        .expect("Failed to create scraper")
        .run()
        .await
        .expect("Scrape failed");

    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].name, "Travel");

    let summary = std::fs::read_to_string(&summary_path).expect("Summary not written");
    assert!(summary.contains("| Travel | 1 | 1 | 1 | 0 | ok |"));
}

#[tokio::test]
async fn test_date_stamped_csv_name() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, "/", root_page(&[("Travel", TRAVEL_PATH)])).await;
    mount_html(&mock_server, TRAVEL_PATH, listing_page(&[], None)).await;

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = create_test_config(&mock_server.uri(), output.path());
    config.output.date_stamp = true;

    let report = Scraper::new(config)
        .expect("Failed to create scraper")
        .run()
        .await
        .expect("Scrape failed");

    let csv_path = report.categories[0].csv_path.clone().expect("CSV not written");
    let file_name = csv_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("Travel_"));
    assert!(file_name.ends_with(".csv"));
    assert_eq!(file_name.len(), "Travel_YYYY-MM-DD.csv".len());

    // Empty category still gets a header-only file
    let (headers, rows) = read_rows(&csv_path);
    assert_eq!(headers.len(), 10);
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_summary_in_missing_directory_is_created() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, "/", root_page(&[("Travel", TRAVEL_PATH)])).await;
    mount_html(&mock_server, TRAVEL_PATH, listing_page(&["trip_1"], None)).await;
    mount_item(&mock_server, "trip_1", "Trip", "Travel").await;

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let summary_path = output.path().join("reports").join("summary.md");
    let mut config = create_test_config(&mock_server.uri(), output.path());
    config.output.download_images = false;
    config.output.summary_path = Some(summary_path.display().to_string());

    let report = Scraper::new(config)
        .expect("Failed to create scraper")
        .run()
        .await
        .expect("Scrape failed");

    assert_eq!(report.total_items_written(), 1);
    assert!(summary_path.is_file());
}

#[tokio::test]
async fn test_unwritable_summary_keeps_report() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, "/", root_page(&[("Travel", TRAVEL_PATH)])).await;
    mount_html(&mock_server, TRAVEL_PATH, listing_page(&["trip_1"], None)).await;
    mount_item(&mock_server, "trip_1", "Trip", "Travel").await;

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = create_test_config(&mock_server.uri(), output.path());
    config.output.download_images = false;
    // An existing directory cannot be written as a file
    config.output.summary_path = Some(output.path().display().to_string());

    let report = Scraper::new(config)
        .expect("Failed to create scraper")
        .run()
        .await
        .expect("Summary failure must not fail the run");

    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.total_items_written(), 1);
    assert!(output.path().join("Travel").join("Travel.csv").is_file());
}

#[tokio::test]
async fn test_item_without_image_uses_placeholder() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, "/", root_page(&[("Travel", TRAVEL_PATH)])).await;
    mount_html(&mock_server, TRAVEL_PATH, listing_page(&["nopic_1"], None)).await;

    let page = item_page("No Picture", "Travel", "Two", "upc-nopic_1", "nopic_1").replace(
        r#"<img src="../../media/cache/nopic_1.jpg" alt="No Picture" />"#,
        "",
    );
    mount_html(&mock_server, "/catalogue/nopic_1/index.html", page).await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/media/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(&mock_server.uri(), output.path());

    let report = Scraper::new(config)
        .expect("Failed to create scraper")
        .run()
        .await
        .expect("Scrape failed");

    let travel = &report.categories[0];
    assert_eq!(travel.items_written, 1);
    assert_eq!(travel.images_downloaded, 0);
    assert_eq!(travel.image_failures.len(), 1);
    assert_eq!(travel.image_failures[0].reason, "no image URL");
    assert!(travel.image_failures[0].url.ends_with("/catalogue/nopic_1/index.html"));

    let (_, rows) = read_rows(&output.path().join("Travel").join("Travel.csv"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][8], "2");
    assert_eq!(rows[0][9], "No image URL found");
}
