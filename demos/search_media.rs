use anilist::{Client, ClientConfig, MediaType};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let search = env::args().nth(1).unwrap_or_else(|| "cowboy bebop".to_string());

    let client = Client::new(ClientConfig::default())?;
    let page = client
        .search_media(&search, Some(MediaType::Anime), 1, 10)
        .await?;

    println!("{} total results", page.page_info.total);
    for media in &page.items {
        let title = media
            .title
            .as_ref()
            .and_then(|t| t.romaji.as_deref())
            .unwrap_or("<untitled>");
        println!("{:>8}  {}", media.id, title);
    }

    Ok(())
}
