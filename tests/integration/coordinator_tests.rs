use crate::common::*;
use poemhunter::crawler::Coordinator;
use poemhunter::ScrapeError;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A poet with `titles` listed one per page, each poem a single line
async fn mount_poet(server: &MockServer, slug: &str, titles: &[&str]) {
    for (i, &title) in titles.iter().enumerate() {
        let poem_slug = title.to_lowercase().replace(' ', "-");
        let poem_path = format!("/poem/{slug}-{poem_slug}/");
        let next = (i + 1 < titles.len()).then(|| format!("/{slug}/poems/page-{}", i + 2));

        mount_html(
            server,
            &format!("/{slug}/poems/page-{}", i + 1),
            poem_listing(&[(poem_path.as_str(), title)], next.as_deref()),
        )
        .await;

        let line = format!("{title} by {slug}");
        mount_html(server, &poem_path, poem_page(title, &[&[line.as_str()]])).await;
    }
}

#[tokio::test]
async fn test_poet_flow_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/"))
        .and(query_param("q", "Robert Frost"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(search_page(Some(("/robert-frost/", "Robert Frost")))),
        )
        .mount(&server)
        .await;
    mount_poet(
        &server,
        "robert-frost",
        &["Birches", "Mending Wall", "Fire and Ice"],
    )
    .await;

    let tmp = TempDir::new().unwrap();
    let coordinator = Coordinator::new(&config_for(&server, 4)).unwrap();
    let stats = coordinator
        .harvest_poet("Robert Frost", tmp.path())
        .await
        .unwrap();
    let out = tmp.path().join("Robert Frost");

    assert_eq!(stats.poets, 1);
    assert_eq!(stats.poems_found, 3);
    assert_eq!(stats.saved, 3);
    assert_eq!(stats.failed(), 0);

    assert_eq!(
        file_names(&out),
        ["Birches.txt", "Fire and Ice.txt", "Mending Wall.txt"]
    );
    assert_eq!(read(&out, "Birches.txt"), "Birches by robert-frost\n");
}

#[tokio::test]
async fn test_poet_flow_into_directory_named_after_poet() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/search/",
        search_page(Some(("/robert-frost/", "Robert Frost"))),
    )
    .await;
    mount_poet(&server, "robert-frost", &["Birches"]).await;

    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("my robert frost collection");

    let coordinator = Coordinator::new(&config_for(&server, 2)).unwrap();
    coordinator.harvest_poet("Robert Frost", &out).await.unwrap();

    assert_eq!(file_names(&out), ["Birches.txt"]);
    assert!(!out.join("Robert Frost").exists());
}

#[tokio::test]
async fn test_poet_flow_is_idempotent() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/search/",
        search_page(Some(("/maya-angelou/", "Maya Angelou"))),
    )
    .await;
    mount_poet(&server, "maya-angelou", &["Still I Rise", "Phenomenal Woman"]).await;

    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("Maya Angelou");
    let coordinator = Coordinator::new(&config_for(&server, 2)).unwrap();

    coordinator
        .harvest_poet("Maya Angelou", tmp.path())
        .await
        .unwrap();
    let first_names = file_names(&out);
    let first_text = read(&out, "Still I Rise.txt");

    let stats = coordinator
        .harvest_poet("Maya Angelou", tmp.path())
        .await
        .unwrap();

    assert_eq!(stats.saved, 2);
    assert_eq!(first_names.len(), 2);
    assert_eq!(file_names(&out), first_names);
    assert_eq!(read(&out, "Still I Rise.txt"), first_text);
}

#[tokio::test]
async fn test_poet_flow_unknown_author_writes_nothing() {
    let server = MockServer::start().await;
    mount_html(&server, "/search/", search_page(None)).await;

    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("nobody");

    let coordinator = Coordinator::new(&config_for(&server, 2)).unwrap();
    let result = coordinator.harvest_poet("Nobody Atall", &out).await;

    assert!(matches!(result, Err(ScrapeError::NotFound { .. })));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_top_flow_end_to_end() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/poets/top/page-1",
        poet_ranking(
            &[
                ("/william-shakespeare/", "William Shakespeare"),
                ("/emily-dickinson/", "Emily Dickinson"),
            ],
            Some("/poets/top/page-2"),
        ),
    )
    .await;
    mount_html(
        &server,
        "/poets/top/page-2",
        poet_ranking(&[("/pablo-neruda/", "Pablo Neruda")], None),
    )
    .await;
    mount_poet(&server, "william-shakespeare", &["Sonnet 18", "Sonnet 130"]).await;
    mount_poet(&server, "emily-dickinson", &["Hope"]).await;
    // Third-ranked poet is not requested.
    Mock::given(method("GET"))
        .and(path("/pablo-neruda/poems/page-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let coordinator = Coordinator::new(&config_for(&server, 3)).unwrap();
    let stats = coordinator.harvest_top(2, tmp.path()).await.unwrap();

    assert_eq!(stats.poets, 2);
    assert_eq!(stats.saved, 3);
    assert!(stats.skipped_poets.is_empty());

    let shakespeare = tmp.path().join("William Shakespeare");
    assert_eq!(file_names(&shakespeare), ["Sonnet 130.txt", "Sonnet 18.txt"]);
    assert_eq!(
        file_names(&tmp.path().join("Emily Dickinson")),
        ["Hope.txt"]
    );
    assert!(!tmp.path().join("Pablo Neruda").exists());
}

#[tokio::test]
async fn test_top_flow_skips_unreadable_poet() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/poets/top/page-1",
        poet_ranking(
            &[
                ("/lost-poet/", "Lost Poet"),
                ("/emily-dickinson/", "Emily Dickinson"),
            ],
            None,
        ),
    )
    .await;
    mount_status(&server, "/lost-poet/poems/page-1", 500).await;
    mount_poet(&server, "emily-dickinson", &["Hope"]).await;

    let tmp = TempDir::new().unwrap();
    let coordinator = Coordinator::new(&config_for(&server, 2)).unwrap();
    let stats = coordinator.harvest_top(2, tmp.path()).await.unwrap();

    assert_eq!(stats.poets, 1);
    assert_eq!(stats.saved, 1);
    assert_eq!(stats.skipped_poets.len(), 1);
    assert_eq!(stats.skipped_poets[0].0, "Lost Poet");
    assert!(tmp.path().join("Emily Dickinson").join("Hope.txt").is_file());
}

#[tokio::test]
async fn test_top_flow_unreadable_ranking_is_an_error() {
    let server = MockServer::start().await;
    mount_html(&server, "/poets/top/page-1", broken_page()).await;

    let tmp = TempDir::new().unwrap();
    let coordinator = Coordinator::new(&config_for(&server, 2)).unwrap();
    let result = coordinator.harvest_top(3, tmp.path()).await;

    assert!(matches!(result, Err(ScrapeError::Parse(_))));
}
