use anilist::{Client, ClientConfig, MediaType};
use tokio_util::sync::CancellationToken;

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn smoke_search_media_paging() {
    // live test against the public api; opt in explicitly
    if std::env::var("ANILIST_SMOKE").is_err() {
        return;
    }

    let mut config = ClientConfig::default();
    if let Ok(token) = std::env::var("ANILIST_TOKEN") {
        config = config.with_token(token);
    }

    let client = Client::new(config).expect("client");
    let mut pages = client
        .search_media_paging("cowboy bebop", Some(MediaType::Anime), 5)
        .expect("paginator");

    let token = CancellationToken::new();
    assert!(pages.advance(&token).await, "first page should arrive");
    let page = pages.current().expect("current page");
    assert!(!page.items.is_empty());
    assert_eq!(page.page_info.current_page, 1);
    assert!(pages.last_error().is_none());
}
