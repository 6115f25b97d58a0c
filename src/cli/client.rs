//! HTTP client for the file API.

use std::time::Duration;

use reqwest::{multipart, StatusCode};

use crate::web::dto::{ApiResponse, FileListResponse, FileUploadResponse, UPLOAD_FIELD};
use crate::{FsStoreError, Result};

/// Base URL used when neither `--base-url` nor `FS_API_BASE_URL` is given.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote file operations used by the CLI.
///
/// Expected failures map to [`FsStoreError::Validation`] (rejected upload or
/// cursor) and [`FsStoreError::NotFound`] (unknown id). Anything else is
/// [`FsStoreError::Http`].
#[allow(async_fn_in_trait)]
pub trait FileApi {
    /// Upload a file and return its id.
    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<String>;

    /// Delete a file by id.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Fetch one page of files.
    async fn list(&self, cursor: Option<&str>) -> Result<FileListResponse>;
}

/// [`FileApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Server base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn files_url(&self) -> String {
        format!("{}/api/files", self.base_url)
    }
}

fn unexpected(status: StatusCode) -> FsStoreError {
    FsStoreError::Http(format!("unexpected response status {status}"))
}

impl FileApi for ApiClient {
    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<String> {
        let part = multipart::Part::bytes(content).file_name(file_name.to_string());
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(self.files_url())
            .multipart(form)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body: ApiResponse<FileUploadResponse> = response.json().await?;
                Ok(body.data.id)
            }
            StatusCode::BAD_REQUEST => Err(FsStoreError::Validation("File is invalid.".to_string())),
            status => Err(unexpected(status)),
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = format!("{}/{}", self.files_url(), urlencoding::encode(id));
        let response = self.http.delete(url).send().await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(()),
            StatusCode::NOT_FOUND => Err(FsStoreError::NotFound(format!("File {id}"))),
            status => Err(unexpected(status)),
        }
    }

    async fn list(&self, cursor: Option<&str>) -> Result<FileListResponse> {
        let url = match cursor {
            Some(cursor) => format!("{}?cursor={}", self.files_url(), urlencoding::encode(cursor)),
            None => self.files_url(),
        };
        let response = self.http.get(url).send().await?;

        match response.status() {
            StatusCode::OK => {
                let body: ApiResponse<FileListResponse> = response.json().await?;
                Ok(body.data)
            }
            StatusCode::BAD_REQUEST => {
                Err(FsStoreError::Validation("Cursor is invalid.".to_string()))
            }
            status => Err(unexpected(status)),
        }
    }
}
