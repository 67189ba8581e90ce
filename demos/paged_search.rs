use anilist::{Client, ClientConfig, MediaType};
use std::env;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let search = env::args().nth(1).unwrap_or_else(|| "one piece".to_string());

    let client = Client::new(ClientConfig::default())?;
    let mut pages = client.search_media_paging(&search, Some(MediaType::Manga), 25)?;

    let token = CancellationToken::new();
    while pages.advance(&token).await {
        let page = pages.current().expect("current page");
        println!(
            "page {} ({} items, more: {})",
            page.page_info.current_page,
            page.items.len(),
            page.page_info.has_next_page
        );
    }

    if let Some(err) = pages.last_error() {
        eprintln!("paging stopped on error: {err}");
        std::process::exit(1);
    }

    Ok(())
}
