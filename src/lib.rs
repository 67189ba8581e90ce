//! anilist graphql client
//!
//! this crate provides a small, typed client for the anilist graphql api.
//! start with [`Client`] and [`ClientConfig`], then use `execute_raw` or
//! `execute` for ad-hoc queries, or the typed endpoint methods for the
//! catalog operations. multi-page endpoints return a [`Paginator`] driven one
//! page at a time with a cancellation token.
//!
//! ## quick start
//!
//! ```no_run
//! use anilist::{Client, ClientConfig, MediaType};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(ClientConfig::default())?;
//! let page = client
//!     .search_media("cowboy bebop", Some(MediaType::Anime), 1, 10)
//!     .await?;
//! println!("{} results", page.page_info.total);
//! # Ok(())
//! # }
//! ```
//!
//! ## paging
//!
//! ```no_run
//! use anilist::{Client, ClientConfig, MediaType};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(ClientConfig::default())?;
//! let mut pages = client.search_media_paging("one piece", Some(MediaType::Manga), 25)?;
//! let token = CancellationToken::new();
//! while pages.advance(&token).await {
//!     for media in &pages.current().unwrap().items {
//!         println!("{}", media.id);
//!     }
//! }
//! // iteration stopping is not the whole story; check for a terminal failure
//! if let Some(err) = pages.last_error() {
//!     eprintln!("paging failed: {err}");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod graphql;
pub mod models;
mod operation;
mod pagination;
pub mod queries;
mod resolver;

pub use client::Client;
pub use config::{ClientConfig, API_URL};
pub use error::{Error, Result};
pub use graphql::{GraphQlError, GraphQlLocation, GraphQlResponse};
pub use models::{Activity, Character, LikeableType, Media, MediaType, Notification, User};
pub use operation::Operation;
pub use pagination::{
    BoxFetch, BoxHasMore, BoxPageFuture, PagedData, PageInfo, Paginator, PaginatorBuilder,
    PagingInfo,
};
pub use resolver::{ContainerRegistry, ContainerShape, Converter, TypeKey};
