//! Blog and gallery listings: search, filter, sort and per-session likes.

mod common;

use axum::http::StatusCode;
use common::{app, Visitor};

fn position(body: &str, needle: &str) -> usize {
    body.find(needle).unwrap_or_else(|| panic!("`{needle}` missing from page"))
}

#[tokio::test]
async fn blog_search_hides_featured_section() {
    let mut visitor = Visitor::new(app());

    let page = visitor.get("/blog?q=acne").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("action=\"/blog/3/like\""));
    assert!(!page.body.contains("action=\"/blog/4/like\""));
    // Featured posts 1 and 2 only appear in the unfiltered view.
    assert!(!page.body.contains("action=\"/blog/1/like\""));
}

#[tokio::test]
async fn unfiltered_blog_shows_featured_first() {
    let mut visitor = Visitor::new(app());

    let page = visitor.get("/blog").await;
    assert_eq!(page.status, StatusCode::OK);
    let featured = position(&page.body, "class=\"featured\"");
    let listing = position(&page.body, "class=\"listing\"");
    assert!(position(&page.body, "action=\"/blog/1/like\"") > featured);
    assert!(position(&page.body, "action=\"/blog/1/like\"") < listing);
    assert!(position(&page.body, "action=\"/blog/6/like\"") > listing);
}

#[tokio::test]
async fn blog_empty_state_and_unknown_parameters() {
    let mut visitor = Visitor::new(app());

    let page = visitor.get("/blog?q=zzzz").await;
    assert!(page.body.contains("No articles found for your filters."));

    // Unknown category and sort values fall back to "all" and "recent".
    let page = visitor.get("/blog?category=astrology&sort=sideways").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("action=\"/blog/5/like\""));
}

#[tokio::test]
async fn gallery_hair_by_popularity() {
    let mut visitor = Visitor::new(app());

    let page = visitor.get("/gallery?category=hair&sort=popular").await;
    assert_eq!(page.status, StatusCode::OK);
    let first = position(&page.body, "action=\"/gallery/2/like\"");
    let second = position(&page.body, "action=\"/gallery/8/like\"");
    assert!(first < second);
    assert!(!page.body.contains("action=\"/gallery/1/like\""));
}

#[tokio::test]
async fn gallery_item_opens_detail_panel() {
    let mut visitor = Visitor::new(app());

    let page = visitor.get("/gallery?item=3").await;
    assert!(page.body.contains("role=\"dialog\""));
    assert!(page.body.contains("Full facial rejuvenation with CO2 laser"));

    let page = visitor.get("/gallery?item=99").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.body.contains("role=\"dialog\""));
}

#[tokio::test]
async fn likes_toggle_per_session() {
    let app = app();
    let mut alice = Visitor::new(app.clone());
    let mut bob = Visitor::new(app);

    alice.get("/blog").await;
    let reply = alice.post_from("/blog/3/like", "http://localhost:3000/blog?q=acne", &[]).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location(), Some("/blog?q=acne"));

    let page = alice.get("/blog/3").await;
    assert!(page.body.contains("aria-pressed=\"true\">&#9829; 157"));

    let page = bob.get("/blog/3").await;
    assert!(page.body.contains("aria-pressed=\"false\">&#9829; 156"));

    // A second press takes the like back.
    alice.post("/blog/3/like", &[]).await;
    let page = alice.get("/blog/3").await;
    assert!(page.body.contains("&#9829; 156"));
}

#[tokio::test]
async fn gallery_like_redirects_to_gallery_without_referer() {
    let mut visitor = Visitor::new(app());

    let reply = visitor.post("/gallery/5/like", &[]).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location(), Some("/gallery"));

    let page = visitor.get("/gallery?category=body").await;
    assert!(page.body.contains("&#9829; 157"));
}

#[tokio::test]
async fn liking_unknown_records_is_not_found() {
    let mut visitor = Visitor::new(app());

    assert_eq!(visitor.post("/blog/42/like", &[]).await.status, StatusCode::NOT_FOUND);
    assert_eq!(visitor.post("/gallery/abc/like", &[]).await.status, StatusCode::NOT_FOUND);
    assert_eq!(visitor.get("/blog/42").await.status, StatusCode::NOT_FOUND);
}
