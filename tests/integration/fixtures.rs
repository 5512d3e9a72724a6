//! HTML fixtures and mock helpers shared by the integration tests

use catalogue_scraper::config::Config;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const POETRY_PATH: &str = "/catalogue/category/books/poetry_23/index.html";
pub const TRAVEL_PATH: &str = "/catalogue/category/books/travel_2/index.html";

/// Creates a test configuration pointed at the mock server
pub fn create_test_config(base_url: &str, output_root: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.http.max_retries = 2;
    config.http.retry_delay_ms = 10;
    config.http.timeout_secs = 5;
    config.output.root_dir = output_root.display().to_string();
    config.output.date_stamp = false;
    config
}

/// Root page with a side navigation listing the given categories
pub fn root_page(categories: &[(&str, &str)]) -> String {
    let entries: String = categories
        .iter()
        .map(|(name, href)| format!(r#"<li><a href="{}">{}</a></li>"#, href.trim_start_matches('/'), name))
        .collect();

    format!(
        r#"<html><body>
        <div class="side_categories">
          <ul class="nav nav-list">
            <li><a href="catalogue/category/books_1/index.html">Books</a>
              <ul>{}</ul>
            </li>
          </ul>
        </div>
        </body></html>"#,
        entries
    )
}

/// Category listing page linking to the given item slugs
pub fn listing_page(slugs: &[&str], next: Option<&str>) -> String {
    let items: String = slugs
        .iter()
        .map(|slug| {
            format!(
                r#"<li><article class="product_pod"><h3><a href="../../../{}/index.html">{}</a></h3></article></li>"#,
                slug, slug
            )
        })
        .collect();
    let pager = match next {
        Some(href) => format!(r#"<li class="next"><a href="{}">next</a></li>"#, href),
        None => String::new(),
    };

    format!(
        r#"<html><body><ol class="row">{}</ol><ul class="pager">{}</ul></body></html>"#,
        items, pager
    )
}

/// Item detail page with the given fields
pub fn item_page(title: &str, category: &str, rating: &str, upc: &str, slug: &str) -> String {
    format!(
        r#"<html><body>
        <ul class="breadcrumb">
          <li><a href="../../index.html">Home</a></li>
          <li><a href="../category/books_1/index.html">Books</a></li>
          <li><a href="../category/books/x/index.html">{category}</a></li>
          <li class="active">{title}</li>
        </ul>
        <article class="product_page">
          <div class="row">
            <div class="col-sm-6"><div class="item active">
              <img src="../../media/cache/{slug}.jpg" alt="{title}" />
            </div></div>
            <div class="col-sm-6 product_main">
              <h1>{title}</h1>
              <p class="price_color">£10.00</p>
              <p class="instock availability">In stock (4 available)</p>
              <p class="star-rating {rating}"></p>
            </div>
          </div>
          <div id="product_description" class="sub-header"><h2>Product Description</h2></div>
          <p>About {title}.</p>
          <table class="table table-striped">
            <tr><th>UPC</th><td>{upc}</td></tr>
            <tr><th>Product Type</th><td>Books</td></tr>
            <tr><th>Price (excl. tax)</th><td>£10.00</td></tr>
            <tr><th>Price (incl. tax)</th><td>£12.00</td></tr>
            <tr><th>Tax</th><td>£2.00</td></tr>
            <tr><th>Availability</th><td>In stock (4 available)</td></tr>
            <tr><th>Number of reviews</th><td>0</td></tr>
          </table>
        </article>
        </body></html>"#,
        title = title,
        category = category,
        rating = rating,
        upc = upc,
        slug = slug
    )
}

pub fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

/// Mounts a GET mock serving an HTML body
pub async fn mount_html(server: &MockServer, url_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Mounts the detail page for an item slug
pub async fn mount_item(server: &MockServer, slug: &str, title: &str, category: &str) {
    mount_html(
        server,
        &format!("/catalogue/{}/index.html", slug),
        item_page(title, category, "Three", &format!("upc-{}", slug), slug),
    )
    .await;
}
