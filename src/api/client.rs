use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, warn};

use super::error::ApiError;
use super::session::Session;
use super::traits::{ListingAdmin, ListingSource};
use crate::config::Config;
use crate::listings::FilterCriteria;
use crate::models::validation::validate_image;
use crate::models::{
    AvailableOptions, LoginRequest, LoginResponse, Property, Status, UploadResponse,
};

/// REST client for the listing backend
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("listing-desk/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(&config.api_url)
            .with_context(|| format!("Invalid backend URL {:?}", config.api_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Backend URL {:?} cannot hold a path", config.api_url);
        }

        Ok(Self {
            client,
            base_url,
            session: None,
        })
    }

    /// Attach an operator session; admin calls fail without one
    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    /// Exchange credentials for a new session
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        info!("Logging in as {}", email);

        let request = self.client.post(self.url(&["auth", "login"])).json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        });
        let response: LoginResponse = self.send(request, "login").await?;

        Ok(Session::from(response))
    }

    /// Backend URL for the given path segments, each one percent-encoded
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let session = self.session.as_ref().ok_or(ApiError::NotAuthenticated)?;
        Ok(request.header(AUTHORIZATION, session.bearer()))
    }

    async fn check(response: Response, what: &str) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        warn!("Backend returned {} for {}", status, what);
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!("Could not read error body for {}: {}", what, e);
                String::new()
            }
        };
        Err(ApiError::from_status(status, what, body))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, ApiError> {
        let response = Self::check(request.send().await?, what).await?;
        let body = response.text().await?;
        debug!("Received {} bytes for {}", body.len(), what);

        Ok(serde_json::from_str(&body)?)
    }

    async fn send_empty(&self, request: RequestBuilder, what: &str) -> Result<(), ApiError> {
        Self::check(request.send().await?, what).await?;
        Ok(())
    }
}

#[async_trait]
impl ListingSource for ApiClient {
    async fn list(&self, criteria: &FilterCriteria) -> Result<Vec<Property>, ApiError> {
        let query = criteria.to_query_pairs();
        if criteria.is_empty() {
            debug!("Listing all properties");
        } else {
            debug!("Listing properties with {:?}", query);
        }

        let request = self.client.get(self.url(&["api", "imoveis"])).query(&query);
        let properties: Vec<Property> = self.send(request, "listings").await?;

        info!("Fetched {} properties", properties.len());
        Ok(properties)
    }

    async fn get(&self, uid: &str) -> Result<Property, ApiError> {
        let request = self.client.get(self.url(&["api", "imoveis", uid]));
        self.send(request, &format!("listing {}", uid)).await
    }
}

#[async_trait]
impl ListingAdmin for ApiClient {
    async fn create(&self, property: &Property) -> Result<Property, ApiError> {
        property.validate()?;
        let request = self
            .authorized(self.client.post(self.url(&["api", "admin", "imoveis"])))?
            .json(property);
        let created: Property = self.send(request, "new listing").await?;

        info!("Created listing {}", created.uid.as_deref().unwrap_or("?"));
        Ok(created)
    }

    async fn update(&self, uid: &str, property: &Property) -> Result<Property, ApiError> {
        property.validate()?;
        let request = self
            .authorized(self.client.put(self.url(&["api", "admin", "imoveis", uid])))?
            .json(property);
        self.send(request, &format!("listing {}", uid)).await
    }

    async fn delete(&self, uid: &str) -> Result<(), ApiError> {
        let request =
            self.authorized(self.client.delete(self.url(&["api", "admin", "imoveis", uid])))?;
        self.send_empty(request, &format!("listing {}", uid)).await?;

        info!("Deleted listing {}", uid);
        Ok(())
    }

    async fn change_status(&self, uid: &str, status: Status) -> Result<Property, ApiError> {
        let request = self
            .authorized(
                self.client
                    .patch(self.url(&["api", "admin", "imoveis", uid, "status"])),
            )?
            .json(&json!({ "status": status }));
        let updated: Property = self.send(request, &format!("listing {}", uid)).await?;

        info!("Listing {} is now {:?}", uid, updated.status());
        Ok(updated)
    }

    async fn available_options(&self) -> Result<AvailableOptions, ApiError> {
        let request = self.authorized(
            self.client
                .get(self.url(&["api", "admin", "imoveis", "opcoes-disponiveis"])),
        )?;
        self.send(request, "listing options").await
    }

    async fn upload_image(
        &self,
        uid: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let size = bytes.len();
        let mime = validate_image(file_name, size)?;
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)?;
        let form = Form::new().part("file", part);

        let request = self
            .authorized(self.client.post(self.url(&["api", "admin", "imagens", "upload"])))?
            .query(&[("imovelUid", uid)])
            .multipart(form);
        let uploaded: UploadResponse = self.send(request, "image upload").await?;

        info!("Uploaded {} ({} bytes) to {}: {}", file_name, size, uploaded.url, uploaded.message);
        Ok(uploaded.url)
    }

    async fn delete_image(&self, url: &str) -> Result<(), ApiError> {
        let request = self
            .authorized(self.client.delete(self.url(&["api", "admin", "imagens"])))?
            .json(&json!({ "url": url }));
        self.send_empty(request, "image").await?;

        info!("Deleted image {}", url);
        Ok(())
    }
}
