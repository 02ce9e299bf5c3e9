//! HTTP API client.
//!
//! [`TechniqueBackend`] is the seam between the store and the network: the
//! real client talks JSON over HTTP with cookie auth and a CSRF header on
//! mutations, tests substitute a scripted backend.

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::constants::{
    CSRF_COOKIE_NAME, CSRF_HEADER, MEDIA_PATH, TECHNIQUES_CATEGORIES_PATH, TECHNIQUES_PATH,
};
use crate::techniques::{MediaInfo, TechniqueTreeData};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
    #[error("access denied")]
    AccessDenied,
    #[error("not found")]
    NotFound,
    #[error("creation response carried no id")]
    MissingId,
    #[error("media already added to this technique")]
    AlreadyAdded,
}

/// Node returned by a creation call.
#[derive(Debug, Clone)]
pub struct CreatedNode {
    pub id: String,
    pub title: String,
}

#[derive(Serialize)]
struct CreateCategoryBody<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<&'a str>,
}

#[derive(Serialize)]
struct AddMediaBody<'a> {
    media_friendly_token: &'a str,
    title_override: &'a str,
}

#[derive(Deserialize)]
struct CreateCategoryResponse {
    id: Option<String>,
    #[serde(default)]
    title: String,
}

/// Look up a cookie value inside a raw `Cookie` header string.
pub fn cookie_value<'a>(cookie: &'a str, name: &str) -> Option<&'a str> {
    cookie.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name {
            Some(value)
        } else {
            None
        }
    })
}

/// Operations the store needs from the server.
#[async_trait]
pub trait TechniqueBackend: Send + Sync {
    async fn fetch_tree(&self) -> Result<TechniqueTreeData, ApiError>;
    async fn fetch_media(&self, friendly_token: &str) -> Result<MediaInfo, ApiError>;
    async fn create_category(
        &self,
        title: &str,
        parent_id: Option<&str>,
    ) -> Result<CreatedNode, ApiError>;
    async fn add_media(
        &self,
        technique_id: &str,
        friendly_token: &str,
        title_override: &str,
    ) -> Result<(), ApiError>;
}

/// JSON-over-HTTP client for the media server.
pub struct ApiClient {
    http: Client,
    base_url: String,
    cookie: String,
}

impl ApiClient {
    pub fn new(base_url: &str, cookie: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie: cookie.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .header(header::COOKIE, &self.cookie)
            .send()
            .await?;
        Ok(response)
    }

    /// Mutating requests carry the CSRF token read from the session cookie.
    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        let mut request = self
            .http
            .post(self.url(path))
            .header(header::COOKIE, &self.cookie)
            .json(body);
        if let Some(token) = cookie_value(&self.cookie, CSRF_COOKIE_NAME) {
            request = request.header(CSRF_HEADER, token);
        }
        Ok(request.send().await?)
    }
}

#[async_trait]
impl TechniqueBackend for ApiClient {
    async fn fetch_tree(&self) -> Result<TechniqueTreeData, ApiError> {
        let response = self.get(TECHNIQUES_PATH).await?;
        match response.status() {
            StatusCode::FORBIDDEN => Err(ApiError::AccessDenied),
            status if !status.is_success() => Err(ApiError::Status(status)),
            _ => Ok(response.json().await?),
        }
    }

    async fn fetch_media(&self, friendly_token: &str) -> Result<MediaInfo, ApiError> {
        let response = self.get(&format!("{MEDIA_PATH}/{friendly_token}")).await?;
        match response.status() {
            StatusCode::FORBIDDEN => Err(ApiError::AccessDenied),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status if !status.is_success() => Err(ApiError::Status(status)),
            _ => Ok(response.json().await?),
        }
    }

    async fn create_category(
        &self,
        title: &str,
        parent_id: Option<&str>,
    ) -> Result<CreatedNode, ApiError> {
        let body = CreateCategoryBody { title, parent_id };
        let response = self.post(TECHNIQUES_CATEGORIES_PATH, &body).await?;
        match response.status() {
            StatusCode::FORBIDDEN => Err(ApiError::AccessDenied),
            status if !status.is_success() => Err(ApiError::Status(status)),
            _ => {
                let created: CreateCategoryResponse = response.json().await?;
                let id = created.id.ok_or(ApiError::MissingId)?;
                Ok(CreatedNode {
                    id,
                    title: created.title,
                })
            }
        }
    }

    async fn add_media(
        &self,
        technique_id: &str,
        friendly_token: &str,
        title_override: &str,
    ) -> Result<(), ApiError> {
        let body = AddMediaBody {
            media_friendly_token: friendly_token,
            title_override,
        };
        let path = format!("{TECHNIQUES_PATH}/{technique_id}/media");
        let response = self.post(&path, &body).await?;
        match response.status() {
            StatusCode::CONFLICT => Err(ApiError::AlreadyAdded),
            StatusCode::FORBIDDEN => Err(ApiError::AccessDenied),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status if !status.is_success() => Err(ApiError::Status(status)),
            _ => Ok(()),
        }
    }
}
