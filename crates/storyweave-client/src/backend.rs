//! HTTP backend for the story services.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use storyweave_core::document::Document;
use storyweave_core::error::ServiceError;
use storyweave_core::services::{
    InitialWordSource, StoryGenerator, StoryPublisher, ThumbnailCatalog,
};
use storyweave_core::story::{PublishedStory, SaveStoryRequest, ThumbnailTemplate};
use storyweave_core::word_card::WordCard;
use tracing::{debug, warn};

const KEYWORDS_PATH: &str = "api/story/chapter/keywords";
const NEXT_CHAPTER_PATH: &str = "api/story/chapter/next";
const THUMBNAIL_TEMPLATES_PATH: &str = "api/thumbnail-templates";
const SAVE_STORY_PATH: &str = "api/story";

#[derive(Serialize)]
struct NextChapterBody<'a> {
    #[serde(rename = "chapterJson")]
    chapter_json: &'a Document,
}

/// Client for the story backend's REST API.
#[derive(Debug, Clone)]
pub struct HttpStoryBackend {
    http: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpStoryBackend {
    /// Creates a client for the backend at `base_url`. Every request gives up
    /// after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let http = Client::builder().timeout(timeout).build().map_err(transport)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            bearer_token: None,
        })
    }

    /// Sends `token` as a bearer credential on every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.get(self.url(path)))
    }

    fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> RequestBuilder {
        self.authorize(self.http.post(self.url(path)).json(body))
    }

    /// Sends `request` and returns the body of a successful response.
    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Vec<u8>, ServiceError> {
        debug!(path, "calling story backend");
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            warn!(path, status = status.as_u16(), "story backend rejected request");
            return Err(ServiceError::Status(status.as_u16()));
        }
        let body = response.bytes().await.map_err(transport)?;
        Ok(body.to_vec())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ServiceError> {
        let body = self.send(path, request).await?;
        serde_json::from_slice(&body).map_err(|err| {
            warn!(path, error = %err, "story backend sent an unreadable body");
            ServiceError::MalformedResponse(err.to_string())
        })
    }
}

fn transport(err: reqwest::Error) -> ServiceError {
    ServiceError::Transport(err.to_string())
}

/// Reads the save response. The backend may answer with the id as a JSON
/// string, an object carrying `storyId`, or no usable body at all.
fn published_story(body: &[u8]) -> PublishedStory {
    let story_id = match serde_json::from_slice::<Value>(body) {
        Ok(Value::String(id)) => Some(id),
        Ok(Value::Object(fields)) => match fields.get("storyId") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        },
        _ => None,
    };
    PublishedStory { story_id }
}

#[async_trait]
impl InitialWordSource for HttpStoryBackend {
    async fn initial_word_cards(&self) -> Result<Vec<WordCard>, ServiceError> {
        self.fetch(KEYWORDS_PATH, self.get(KEYWORDS_PATH)).await
    }
}

#[async_trait]
impl StoryGenerator for HttpStoryBackend {
    async fn next_word_cards(&self, chapter: &Document) -> Result<Vec<WordCard>, ServiceError> {
        let body = NextChapterBody {
            chapter_json: chapter,
        };
        self.fetch(NEXT_CHAPTER_PATH, self.post(NEXT_CHAPTER_PATH, &body))
            .await
    }
}

#[async_trait]
impl ThumbnailCatalog for HttpStoryBackend {
    async fn thumbnail_templates(&self) -> Result<Vec<ThumbnailTemplate>, ServiceError> {
        self.fetch(THUMBNAIL_TEMPLATES_PATH, self.get(THUMBNAIL_TEMPLATES_PATH))
            .await
    }
}

#[async_trait]
impl StoryPublisher for HttpStoryBackend {
    async fn save_story(&self, request: &SaveStoryRequest) -> Result<PublishedStory, ServiceError> {
        let body = self
            .send(SAVE_STORY_PATH, self.post(SAVE_STORY_PATH, request))
            .await?;
        Ok(published_story(&body))
    }
}
