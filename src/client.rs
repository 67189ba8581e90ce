//! main client
//!
//! includes helpers for raw graphql execution, typed responses, and the paged
//! endpoint surface built on [`Paginator`].

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::graphql::{classify_response, GraphQlResponse};
use crate::models::{Activity, Character, LikeableType, Media, MediaType, Notification, User};
use crate::operation::Operation;
use crate::pagination::{PagedData, Paginator, PagingInfo};
use crate::queries;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// graphql client for anilist
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl Client {
    /// create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|err| Error::Config(format!("invalid api token header value: {err}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        headers.extend(config.extra_headers.clone());

        let http = match &config.http_client {
            Some(prebuilt) => prebuilt.clone(),
            None => {
                let mut builder = reqwest::Client::builder()
                    .default_headers(headers)
                    .user_agent(config.user_agent.clone())
                    .timeout(config.timeout)
                    .danger_accept_invalid_certs(!config.verify_ssl);
                if let Some(customize) = &config.http_client_builder {
                    builder = customize(builder);
                }
                builder.build()?
            }
        };

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// access the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// execute a raw graphql query
    pub async fn execute_raw(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<GraphQlResponse<Value>> {
        self.execute(query, variables).await
    }

    /// execute a graphql query and deserialize into a typed response
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<GraphQlResponse<T>> {
        self.execute_with(query, variables, |url, body| async move {
            let response = self.http.post(url).json(&body).send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok((status, text))
        })
        .await
    }

    /// execute a catalog operation by type
    pub async fn execute_operation<O: Operation>(
        &self,
        variables: Option<Value>,
    ) -> Result<GraphQlResponse<O::Response>> {
        self.execute(O::QUERY, variables).await
    }
}

/// paged endpoint surface
impl Client {
    /// fetch a user by name
    pub async fn get_user(&self, name: &str) -> Result<User> {
        let variables = serde_json::json!({ "name": name });
        let envelope = self
            .execute::<UserEnvelope>(queries::GET_USER_BY_NAME, Some(variables))
            .await?
            .into_data()?;
        Ok(envelope.user)
    }

    /// search media, fetching a single page
    pub async fn search_media(
        &self,
        search: &str,
        media_type: Option<MediaType>,
        page: i32,
        per_page: i32,
    ) -> Result<PagedData<Media>> {
        let mut variables = media_search_variables(search, media_type);
        merge_paging_variables(&mut variables, page, per_page);
        let envelope = self
            .execute::<PageEnvelope<Media>>(queries::SEARCH_MEDIA, Some(variables))
            .await?
            .into_data()?;
        Ok(envelope.page)
    }

    /// search media page by page
    pub fn search_media_paging(
        &self,
        search: &str,
        media_type: Option<MediaType>,
        per_page: i32,
    ) -> Result<Paginator<Media>> {
        self.paged(
            queries::SEARCH_MEDIA,
            media_search_variables(search, media_type),
            per_page,
        )
    }

    /// search users, fetching a single page
    pub async fn search_users(
        &self,
        search: &str,
        page: i32,
        per_page: i32,
    ) -> Result<PagedData<User>> {
        let mut variables = serde_json::json!({ "search": search });
        merge_paging_variables(&mut variables, page, per_page);
        let envelope = self
            .execute::<PageEnvelope<User>>(queries::SEARCH_USERS, Some(variables))
            .await?
            .into_data()?;
        Ok(envelope.page)
    }

    /// search characters, fetching a single page
    pub async fn search_characters(
        &self,
        search: &str,
        page: i32,
        per_page: i32,
    ) -> Result<PagedData<Character>> {
        let mut variables = serde_json::json!({ "search": search });
        merge_paging_variables(&mut variables, page, per_page);
        let envelope = self
            .execute::<PageEnvelope<Character>>(queries::SEARCH_CHARACTERS, Some(variables))
            .await?
            .into_data()?;
        Ok(envelope.page)
    }

    /// page through the activity feed of followed users (requires a token)
    pub fn user_activity_paging(&self, per_page: i32) -> Result<Paginator<Activity>> {
        self.paged(queries::USER_ACTIVITY, serde_json::json!({}), per_page)
    }

    /// page through the viewer's notifications (requires a token)
    pub fn user_notifications_paging(&self, per_page: i32) -> Result<Paginator<Notification>> {
        self.paged(queries::USER_NOTIFICATIONS, serde_json::json!({}), per_page)
    }

    /// toggle a like on a likeable object, returning its updated likers
    /// (requires a token)
    pub async fn toggle_like(&self, id: i64, likeable_type: LikeableType) -> Result<Vec<User>> {
        let variables = serde_json::json!({ "id": id, "type": likeable_type });
        let envelope = self
            .execute::<LikesEnvelope>(queries::TOGGLE_LIKE, Some(variables))
            .await?
            .into_data()?;
        Ok(envelope.likes.unwrap_or_default())
    }

    /// build a paginator for any paged catalog document
    ///
    /// the document must wrap results in `page: Page(page: $page, perPage:
    /// $perPage)` and alias the list field to `items`. the fetch closure
    /// injects the cursor into `variables` on every call and respects the
    /// cancellation token around the transport future; continuation follows
    /// the page metadata's `hasNextPage`.
    pub fn paged<T>(
        &self,
        query: &'static str,
        variables: Value,
        per_page: i32,
    ) -> Result<Paginator<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();
        Paginator::builder(per_page)
            .fetch(move |info: PagingInfo, token: CancellationToken| {
                let client = client.clone();
                let mut variables = variables.clone();
                async move {
                    merge_paging_variables(&mut variables, info.page, info.page_size);
                    let request = client.execute::<PageEnvelope<T>>(query, Some(variables));
                    match token.run_until_cancelled(request).await {
                        Some(response) => Ok(response?.into_data()?.page),
                        None => Err(Error::Cancelled),
                    }
                }
            })
            .has_more(|_, page: &PagedData<T>| page.page_info.has_next_page)
            .build()
    }
}

/// response envelope for paged catalog documents
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned + 'static"))]
struct PageEnvelope<T> {
    page: PagedData<T>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Debug, Deserialize)]
struct LikesEnvelope {
    // the api reports null instead of an empty list
    likes: Option<Vec<User>>,
}

fn media_search_variables(search: &str, media_type: Option<MediaType>) -> Value {
    let mut variables = serde_json::json!({ "search": search });
    // anilist treats an explicit null type as a filter, so only set it when given
    if let Some(media_type) = media_type {
        variables["type"] = serde_json::json!(media_type);
    }
    variables
}

fn merge_paging_variables(variables: &mut Value, page: i32, per_page: i32) {
    if let Value::Object(map) = variables {
        map.insert("page".to_string(), page.into());
        map.insert("perPage".to_string(), per_page.into());
    }
}

impl Client {
    pub(crate) async fn execute_with<T: DeserializeOwned, F, Fut>(
        &self,
        query: &str,
        variables: Option<Value>,
        send: F,
    ) -> Result<GraphQlResponse<T>>
    where
        F: FnOnce(Url, Value) -> Fut,
        Fut: Future<Output = Result<(StatusCode, String)>>,
    {
        let url = self.config.graphql_url();
        let body = serde_json::json!({
            "query": query,
            "variables": variables.unwrap_or_else(|| serde_json::json!({})),
        });

        let (status, text) = send(url, body).await?;
        classify_response(status.as_u16(), text)
    }
}
