use crate::common::*;
use poemhunter::crawler::collect_poems;
use poemhunter::model::PoetReference;
use poemhunter::{FetchError, ScrapeError};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn frost(server: &MockServer) -> PoetReference {
    PoetReference::new("Robert Frost", server_url(server, "/robert-frost/"))
}

#[tokio::test]
async fn test_collects_across_pages_without_boundary_duplicates() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/robert-frost/poems/page-1",
        poem_listing(
            &[
                ("/poem/fire-and-ice/", "Fire and Ice"),
                ("/poem/nothing-gold-can-stay/", "Nothing Gold Can Stay"),
                ("/poem/the-road-not-taken/", "The Road Not Taken"),
            ],
            Some("/robert-frost/poems/page-2"),
        ),
    )
    .await;
    mount_html(
        &server,
        "/robert-frost/poems/page-2",
        poem_listing(
            &[
                ("/poem/the-road-not-taken/", "The Road Not Taken"),
                ("/poem/mending-wall/", "Mending Wall"),
            ],
            Some("/robert-frost/poems/page-3"),
        ),
    )
    .await;
    mount_html(
        &server,
        "/robert-frost/poems/page-3",
        poem_listing(&[("/poem/birches/", "Birches")], None),
    )
    .await;

    let poems = collect_poems(&client(), &frost(&server)).await.unwrap();

    let titles: Vec<&str> = poems.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Fire and Ice",
            "Nothing Gold Can Stay",
            "The Road Not Taken",
            "Mending Wall",
            "Birches"
        ]
    );
}

#[tokio::test]
async fn test_every_page_split_yields_each_poem_once() {
    let links: Vec<(String, String)> = (0..6)
        .map(|i| (format!("/poem/verse-{i}/"), format!("Verse {i}")))
        .collect();
    let links: Vec<(&str, &str)> = links
        .iter()
        .map(|(href, title)| (href.as_str(), title.as_str()))
        .collect();

    for split in 1..links.len() {
        let server = MockServer::start().await;

        // The entry on the boundary shows up at the end of page 1 and again at
        // the start of page 2.
        mount_html(
            &server,
            "/robert-frost/poems/page-1",
            poem_listing(&links[..split], Some("/robert-frost/poems/page-2")),
        )
        .await;
        mount_html(
            &server,
            "/robert-frost/poems/page-2",
            poem_listing(&links[split - 1..], None),
        )
        .await;

        let poems = collect_poems(&client(), &frost(&server)).await.unwrap();

        let titles: Vec<&str> = poems.iter().map(|p| p.title.as_str()).collect();
        let expected: Vec<&str> = links.iter().map(|(_, title)| *title).collect();
        assert_eq!(titles, expected, "split after {split}");
    }
}

#[tokio::test]
async fn test_stops_when_a_page_adds_nothing() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/robert-frost/poems/page-1",
        poem_listing(
            &[("/poem/birches/", "Birches")],
            Some("/robert-frost/poems/page-2"),
        ),
    )
    .await;

    // Every page past the last one repeats it, next link included.
    let last = poem_listing(
        &[("/poem/mending-wall/", "Mending Wall")],
        Some("/robert-frost/poems/page-99"),
    );
    mount_html(&server, "/robert-frost/poems/page-2", last.clone()).await;
    Mock::given(method("GET"))
        .and(path("/robert-frost/poems/page-99"))
        .respond_with(ResponseTemplate::new(200).set_body_string(last))
        .expect(1)
        .mount(&server)
        .await;

    let poems = collect_poems(&client(), &frost(&server)).await.unwrap();
    assert_eq!(poems.len(), 2);
}

#[tokio::test]
async fn test_next_link_back_to_visited_page() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/robert-frost/poems/page-1",
        poem_listing(
            &[("/poem/birches/", "Birches")],
            Some("/robert-frost/poems/page-2"),
        ),
    )
    .await;
    mount_html(
        &server,
        "/robert-frost/poems/page-2",
        poem_listing(
            &[("/poem/mending-wall/", "Mending Wall")],
            Some("/robert-frost/poems/page-1"),
        ),
    )
    .await;

    let poems = collect_poems(&client(), &frost(&server)).await.unwrap();
    assert_eq!(poems.len(), 2);
}

#[tokio::test]
async fn test_poet_with_no_poems() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/robert-frost/poems/page-1",
        poem_listing(&[], Some("/robert-frost/poems/page-2")),
    )
    .await;

    let poems = collect_poems(&client(), &frost(&server)).await.unwrap();
    assert!(poems.is_empty());
}

#[tokio::test]
async fn test_first_page_failure_is_an_error() {
    let server = MockServer::start().await;
    mount_status(&server, "/robert-frost/poems/page-1", 404).await;

    let result = collect_poems(&client(), &frost(&server)).await;
    assert!(matches!(
        result,
        Err(ScrapeError::Fetch(FetchError::Status { .. }))
    ));
}

#[tokio::test]
async fn test_later_page_failure_keeps_earlier_pages() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/robert-frost/poems/page-1",
        poem_listing(
            &[
                ("/poem/birches/", "Birches"),
                ("/poem/mending-wall/", "Mending Wall"),
            ],
            Some("/robert-frost/poems/page-2"),
        ),
    )
    .await;
    mount_status(&server, "/robert-frost/poems/page-2", 500).await;

    let poems = collect_poems(&client(), &frost(&server)).await.unwrap();
    assert_eq!(poems.len(), 2);
}

#[tokio::test]
async fn test_slow_listing_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robert-frost/poems/page-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(poem_listing(&[], None))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client_with_timeout(Duration::from_millis(300));
    match collect_poems(&client, &frost(&server)).await {
        Err(ScrapeError::Fetch(e @ FetchError::Timeout { .. })) => {
            assert!(e.url().ends_with("/robert-frost/poems/page-1"))
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}
