/// HTTP client for the remote content API
///
/// All functions are async and meant to be driven by `Task::perform`;
/// the client is cheap to clone into each task.

use serde_json::Value;

use super::{collection_path, detail_path, facet_path, shape, FetchError, HEADER_PATH};
use crate::config::Settings;
use crate::state::data::{CatalogKind, Entity, FacetKind, FacetValue, Header};

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    api_url: String,
    media_origin: String,
}

impl CatalogClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: settings.api_url.clone(),
            media_origin: settings.media_origin.clone(),
        }
    }

    /// GET `path` relative to the API root and parse the body as JSON
    async fn get_json(&self, resource: &str, path: &str) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.api_url, path);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                resource: resource.to_owned(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource: resource.to_owned(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| FetchError::Decode {
            resource: resource.to_owned(),
            message: e.to_string(),
        })
    }

    fn decode_error(resource: &str, message: String) -> FetchError {
        FetchError::Decode {
            resource: resource.to_owned(),
            message,
        }
    }

    /// Fetch every entity of a catalog
    pub async fn fetch_collection(self, kind: CatalogKind) -> Result<Vec<Entity>, FetchError> {
        let resource = kind.title().to_lowercase();
        let body = self.get_json(&resource, collection_path(kind)).await?;
        shape::collection(kind, &body, &self.media_origin)
            .map_err(|message| Self::decode_error(&resource, message))
    }

    /// Fetch one entity with its cross-references and media expanded
    pub async fn fetch_entity_detail(self, kind: CatalogKind, id: String) -> Result<Entity, FetchError> {
        let resource = format!("{} {}", kind.title().to_lowercase(), id);
        let body = self.get_json(&resource, &detail_path(kind, &id)).await?;
        shape::detail(kind, &body, &self.media_origin)
            .map_err(|message| Self::decode_error(&resource, message))
    }

    /// Fetch the checkbox options of one facet group
    pub async fn fetch_facet_values(self, kind: FacetKind) -> Result<Vec<FacetValue>, FetchError> {
        let resource = kind.title().to_lowercase();
        let body = self.get_json(&resource, facet_path(kind)).await?;
        Ok(shape::facet_options(&body, &self.media_origin))
    }

    /// Fetch the landing page header
    pub async fn fetch_header(self) -> Result<Header, FetchError> {
        let body = self.get_json("header", HEADER_PATH).await?;
        shape::header(&body, &self.media_origin).map_err(|message| Self::decode_error("header", message))
    }

    /// Fetch the raw bytes of an image
    pub async fn fetch_media(self, url: String) -> Result<Vec<u8>, FetchError> {
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                resource: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource: url,
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Transport {
            resource: url.clone(),
            message: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}
