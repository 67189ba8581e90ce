//! pagination engine
//!
//! generic async paginator for page-numbered anilist results. a paginator is
//! built from a page size, a fetch function, and a continuation predicate,
//! then driven one page at a time with [`Paginator::advance`]. iteration is
//! single-pass and not restartable; a fetch failure parks the paginator in a
//! terminal errored state and the failure stays inspectable via
//! [`Paginator::last_error`], so a consumer can tell exhaustion apart from
//! breakage.

use crate::error::{Error, Result};
use crate::resolver::{ContainerRegistry, TypeKey};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::future::Future;
use std::pin::Pin;
use tokio_util::sync::CancellationToken;

/// cursor state driven by the paginator
///
/// passed to the fetch function by value, so fetch implementations cannot
/// mutate the driver's copy. `page` starts at 1 and only ever grows; once
/// `remaining` turns false it stays false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingInfo {
    /// next page to fetch (1-based)
    pub page: i32,
    /// requested page size
    pub page_size: i32,
    /// whether another page may exist
    pub remaining: bool,
}

impl PagingInfo {
    fn new(page_size: i32) -> Self {
        PagingInfo {
            page: 1,
            page_size,
            remaining: true,
        }
    }
}

/// page metadata reported by the anilist `Page` wrapper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// total matching items
    #[serde(default)]
    pub total: i64,
    /// page size the server applied
    #[serde(default)]
    pub per_page: i32,
    /// page this response covers (1-based)
    #[serde(default)]
    pub current_page: i32,
    /// last page number
    #[serde(default)]
    pub last_page: i32,
    /// whether a next page exists
    #[serde(default)]
    pub has_next_page: bool,
}

/// one fetched page of results
///
/// deserialization resolves the `items` container through the
/// [`ContainerRegistry`]: a null or absent list normalizes to an empty one,
/// and a non-array payload is a serialization error.
#[derive(Debug, Clone)]
pub struct PagedData<T> {
    /// page metadata
    pub page_info: PageInfo,
    /// item payloads for this page
    pub items: Vec<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPagedData {
    #[serde(default)]
    page_info: PageInfo,
    #[serde(default, alias = "Data")]
    items: Option<serde_json::Value>,
}

impl<'de, T> Deserialize<'de> for PagedData<T>
where
    T: DeserializeOwned + 'static,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;

        let raw = RawPagedData::deserialize(deserializer)?;
        let key = TypeKey::sequence_of(TypeKey::of::<T>());
        let converter = ContainerRegistry::global()
            .resolve(&key)
            .map_err(D::Error::custom)?;
        let items = converter
            .apply(raw.items.unwrap_or(serde_json::Value::Null))
            .map_err(D::Error::custom)?;
        let items: Vec<T> = serde_json::from_value(items).map_err(D::Error::custom)?;

        Ok(PagedData {
            page_info: raw.page_info,
            items,
        })
    }
}

/// boxed future returned by a boxed fetch function
pub type BoxPageFuture<T> = Pin<Box<dyn Future<Output = Result<PagedData<T>>> + Send>>;

/// boxed page-fetch function
pub type BoxFetch<T> = Box<dyn FnMut(PagingInfo, CancellationToken) -> BoxPageFuture<T> + Send>;

/// boxed continuation predicate
pub type BoxHasMore<T> = Box<dyn FnMut(&PagingInfo, &PagedData<T>) -> bool + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NotStarted,
    HasPage,
    Exhausted,
    Errored,
}

/// generic async paginator over page-numbered data
pub struct Paginator<T> {
    info: PagingInfo,
    fetch: BoxFetch<T>,
    has_more: BoxHasMore<T>,
    current: Option<PagedData<T>>,
    last_error: Option<Error>,
    state: State,
}

/// builder for [`Paginator`]
///
/// both callbacks are required; `build` fails fast when one is missing or the
/// page size is not positive.
pub struct PaginatorBuilder<T> {
    page_size: i32,
    fetch: Option<BoxFetch<T>>,
    has_more: Option<BoxHasMore<T>>,
}

impl<T> PaginatorBuilder<T> {
    /// set the page-fetch function
    pub fn fetch<F, Fut>(mut self, mut fetch: F) -> Self
    where
        F: FnMut(PagingInfo, CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<PagedData<T>>> + Send + 'static,
    {
        self.fetch = Some(Box::new(move |info, token| Box::pin(fetch(info, token))));
        self
    }

    /// set the continuation predicate, called once per successful page
    pub fn has_more<F>(mut self, has_more: F) -> Self
    where
        F: FnMut(&PagingInfo, &PagedData<T>) -> bool + Send + 'static,
    {
        self.has_more = Some(Box::new(has_more));
        self
    }

    /// build the paginator, validating the construction contract
    pub fn build(self) -> Result<Paginator<T>> {
        if self.page_size <= 0 {
            return Err(Error::InvalidArgument(format!(
                "page size must be positive, got {}",
                self.page_size
            )));
        }
        let fetch = self.fetch.ok_or(Error::NullArgument("fetch"))?;
        let has_more = self.has_more.ok_or(Error::NullArgument("has_more"))?;

        Ok(Paginator {
            info: PagingInfo::new(self.page_size),
            fetch,
            has_more,
            current: None,
            last_error: None,
            state: State::NotStarted,
        })
    }
}

impl<T> Paginator<T> {
    /// start building a paginator with the given page size
    pub fn builder(page_size: i32) -> PaginatorBuilder<T> {
        PaginatorBuilder {
            page_size,
            fetch: None,
            has_more: None,
        }
    }

    /// the configured page size
    pub fn page_size(&self) -> i32 {
        self.info.page_size
    }

    /// the current paging cursor
    pub fn paging_info(&self) -> PagingInfo {
        self.info
    }

    /// the page produced by the last successful [`Paginator::advance`]
    pub fn current(&self) -> Option<&PagedData<T>> {
        self.current.as_ref()
    }

    /// the failure that terminated the paginator, if any
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// fetch the next page
    ///
    /// returns true when a new page is available through
    /// [`Paginator::current`]. returns false on exhaustion, on a fetch
    /// failure, or when `token` was already cancelled; the latter two park
    /// the paginator in a terminal errored state with the failure retained in
    /// [`Paginator::last_error`]. the token is handed through to the fetch
    /// function; cancellation is cooperative only. at most one fetch is in
    /// flight per paginator, which `&mut self` enforces.
    pub async fn advance(&mut self, token: &CancellationToken) -> bool {
        if matches!(self.state, State::Exhausted | State::Errored) {
            return false;
        }

        // exhaustion wins over cancellation: a paginator whose predicate
        // already refused must not report a late cancel as a failure
        if !self.info.remaining {
            self.state = State::Exhausted;
            self.current = None;
            return false;
        }

        if token.is_cancelled() {
            self.state = State::Errored;
            self.current = None;
            self.last_error = Some(Error::Cancelled);
            return false;
        }

        match (self.fetch)(self.info, token.clone()).await {
            Ok(page) => {
                self.info.page += 1;
                self.info.remaining = (self.has_more)(&self.info, &page);
                self.current = Some(page);
                self.state = State::HasPage;
                true
            }
            Err(err) => {
                self.state = State::Errored;
                self.current = None;
                self.last_error = Some(err);
                false
            }
        }
    }

    /// drain all pages into one collection
    ///
    /// a terminal fetch failure is propagated instead of being swallowed.
    pub async fn collect_all(mut self, token: &CancellationToken) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while self.advance(token).await {
            if let Some(page) = self.current.take() {
                items.extend(page.items);
            }
        }
        match self.last_error {
            Some(err) => Err(err),
            None => Ok(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn page(current_page: i32, has_next_page: bool, items: Vec<i32>) -> PagedData<i32> {
        PagedData {
            page_info: PageInfo {
                total: 0,
                per_page: items.len() as i32,
                current_page,
                last_page: 0,
                has_next_page,
            },
            items,
        }
    }

    fn counting_fetch(
        calls: Arc<AtomicU32>,
        pages: u32,
    ) -> impl FnMut(PagingInfo, CancellationToken) -> BoxPageFuture<i32> + Send {
        move |info, _token| {
            let calls = calls.clone();
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(page(info.page, (info.page as u32) < pages, vec![info.page]))
            })
        }
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_single_page_then_exhausted() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut paginator = Paginator::builder(10)
            .fetch(counting_fetch(calls.clone(), 5))
            .has_more(|_, _| false)
            .build()
            .unwrap();

        let token = CancellationToken::new();
        assert!(paginator.advance(&token).await);
        assert_eq!(paginator.current().unwrap().items, vec![1]);

        assert!(!paginator.advance(&token).await);
        assert!(paginator.last_error().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // terminal: further advances have no side effects
        assert!(!paginator.advance(&token).await);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_build_rejects_bad_page_size() {
        let build = |page_size| {
            Paginator::builder(page_size)
                .fetch(|info, _| async move { Ok(page(info.page, false, vec![])) })
                .has_more(|_, _| false)
                .build()
        };
        assert!(matches!(build(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(build(-3), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_build_rejects_missing_callbacks() {
        let missing_fetch = Paginator::<i32>::builder(10)
            .has_more(|_, _| false)
            .build();
        assert!(matches!(missing_fetch, Err(Error::NullArgument("fetch"))));

        let missing_predicate = Paginator::<i32>::builder(10)
            .fetch(|info, _| async move { Ok(page(info.page, false, vec![])) })
            .build();
        assert!(matches!(
            missing_predicate,
            Err(Error::NullArgument("has_more"))
        ));
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_failure_on_page_k_retains_error() {
        let mut paginator = Paginator::builder(10)
            .fetch(|info: PagingInfo, _| async move {
                if info.page < 3 {
                    Ok(page(info.page, true, vec![info.page]))
                } else {
                    Err(Error::Protocol {
                        status: Some(500),
                        body: String::new(),
                        message: "boom".to_string(),
                    })
                }
            })
            .has_more(|_, page| page.page_info.has_next_page)
            .build()
            .unwrap();

        let token = CancellationToken::new();
        assert!(paginator.advance(&token).await);
        assert_eq!(paginator.current().unwrap().items, vec![1]);
        assert!(paginator.advance(&token).await);
        assert_eq!(paginator.current().unwrap().items, vec![2]);

        assert!(!paginator.advance(&token).await);
        assert!(matches!(
            paginator.last_error(),
            Some(Error::Protocol { status: Some(500), .. })
        ));

        // errored is terminal and the cursor no longer moves
        let info = paginator.paging_info();
        assert!(!paginator.advance(&token).await);
        assert_eq!(paginator.paging_info(), info);
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_page_increments_by_one_per_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut paginator = Paginator::builder(25)
            .fetch(counting_fetch(calls, 3))
            .has_more(|_, page| page.page_info.has_next_page)
            .build()
            .unwrap();

        let token = CancellationToken::new();
        assert_eq!(paginator.paging_info().page, 1);
        assert!(paginator.advance(&token).await);
        assert_eq!(paginator.paging_info().page, 2);
        assert!(paginator.advance(&token).await);
        assert_eq!(paginator.paging_info().page, 3);
        assert!(paginator.advance(&token).await);
        assert_eq!(paginator.paging_info().page, 4);

        // exhausted advance leaves the cursor untouched
        assert!(!paginator.advance(&token).await);
        assert_eq!(paginator.paging_info().page, 4);
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_refused_predicate_prevents_next_fetch() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut paginator = Paginator::builder(10)
            .fetch(counting_fetch(calls.clone(), 10))
            .has_more(|info, _| info.page <= 2)
            .build()
            .unwrap();

        let token = CancellationToken::new();
        assert!(paginator.advance(&token).await);
        assert!(paginator.advance(&token).await);
        assert!(!paginator.advance(&token).await);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(paginator.last_error().is_none());
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_pre_cancelled_token_never_fetches() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut paginator = Paginator::builder(10)
            .fetch(counting_fetch(calls.clone(), 10))
            .has_more(|_, _| true)
            .build()
            .unwrap();

        let token = CancellationToken::new();
        token.cancel();

        assert!(!paginator.advance(&token).await);
        assert!(matches!(paginator.last_error(), Some(Error::Cancelled)));
        assert!(paginator.current().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_cancel_after_last_page_is_exhaustion_not_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut paginator = Paginator::builder(10)
            .fetch(counting_fetch(calls.clone(), 10))
            .has_more(|_, _| false)
            .build()
            .unwrap();

        let token = CancellationToken::new();
        assert!(paginator.advance(&token).await);
        token.cancel();

        assert!(!paginator.advance(&token).await);
        assert!(paginator.last_error().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // still plain exhaustion on repeat, not a cancellation failure
        assert!(!paginator.advance(&token).await);
        assert!(paginator.last_error().is_none());
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_collect_all() {
        let calls = Arc::new(AtomicU32::new(0));
        let paginator = Paginator::builder(10)
            .fetch(counting_fetch(calls.clone(), 3))
            .has_more(|_, page| page.page_info.has_next_page)
            .build()
            .unwrap();

        let token = CancellationToken::new();
        let items = paginator.collect_all(&token).await.unwrap();
        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_collect_all_propagates_failure() {
        let paginator = Paginator::builder(10)
            .fetch(|info: PagingInfo, _| async move {
                if info.page == 1 {
                    Ok(page(1, true, vec![1]))
                } else {
                    Err(Error::Cancelled)
                }
            })
            .has_more(|_, page| page.page_info.has_next_page)
            .build()
            .unwrap();

        let token = CancellationToken::new();
        let err = paginator.collect_all(&token).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_paged_data_deserializes_null_items_as_empty() {
        let text = "{\"pageInfo\": {\"currentPage\": 1, \"hasNextPage\": false}, \"items\": null}";
        let page: PagedData<i32> = serde_json::from_str(text).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.page_info.current_page, 1);
        assert!(!page.page_info.has_next_page);
    }

    #[test]
    fn test_paged_data_rejects_non_array_items() {
        let text = "{\"pageInfo\": {}, \"items\": {\"nope\": 1}}";
        let err = serde_json::from_str::<PagedData<i32>>(text).unwrap_err();
        assert!(err.to_string().contains("expected an array"));
    }
}
