use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::de::DeserializeOwned;
use studio_logging::{studio_debug, studio_warn};
use url::Url;

use crate::{
    decode_html, listing::parse_listing, ActionReply, AtomicFileWriter, FailureKind, PageListing,
    Section, ServiceError, StatusReport,
};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: Url,
    /// `None` leaves connection attempts to the OS.
    pub connect_timeout: Option<Duration>,
    /// `None` lets a hung request stall forever, like the browser client did.
    pub request_timeout: Option<Duration>,
    /// Cap for `/download/<file>`; the service accepts uploads up to 500 MiB.
    pub max_download_bytes: u64,
    pub poll_interval: Duration,
}

impl ServiceSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: None,
            request_timeout: None,
            max_download_bytes: 500 * 1024 * 1024,
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// Operations the processing service exposes over HTTP.
#[async_trait::async_trait]
pub trait ProcessingService: Send + Sync {
    /// POST `/select_video` with `video=<id>`.
    async fn select_video(&self, video: &str) -> Result<ActionReply, ServiceError>;

    /// POST `/stop_video`.
    async fn stop_video(&self) -> Result<ActionReply, ServiceError>;

    /// GET `/delete_uploaded/<f>` or `/delete_processed/<f>`.
    ///
    /// Any HTTP answer counts as done; the service redirects to the index.
    async fn delete_file(&self, filename: &str, section: Section) -> Result<(), ServiceError>;

    /// POST `/delete_all_uploads`.
    async fn delete_all_uploads(&self) -> Result<ActionReply, ServiceError>;

    /// GET `/get_status`.
    async fn get_status(&self) -> Result<StatusReport, ServiceError>;

    /// GET `/` and scrape the listing out of it.
    async fn load_page(&self) -> Result<PageListing, ServiceError>;

    /// GET `/download/<f>` into `dir`, returning the written path.
    async fn download_processed(&self, filename: &str, dir: &Path)
        -> Result<PathBuf, ServiceError>;

    /// Live feed the display points at; the client never fetches it itself.
    fn stream_url(&self) -> Result<Url, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestProcessingService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl ReqwestProcessingService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.settings.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ServiceError::new(
                    FailureKind::InvalidUrl,
                    format!("{} cannot take a path", self.settings.base_url),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post_action(
        &self,
        segment: &str,
        form: Option<&[(&str, &str)]>,
    ) -> Result<ActionReply, ServiceError> {
        let url = self.endpoint(&[segment])?;
        studio_debug!("POST {}", url);
        let mut request = self.client.post(url);
        if let Some(pairs) = form {
            let body = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs.iter().copied())
                .finish();
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED))
                .body(body);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;
        read_json(response).await
    }
}

#[async_trait::async_trait]
impl ProcessingService for ReqwestProcessingService {
    async fn select_video(&self, video: &str) -> Result<ActionReply, ServiceError> {
        self.post_action("select_video", Some(&[("video", video)][..]))
            .await
    }

    async fn stop_video(&self) -> Result<ActionReply, ServiceError> {
        self.post_action("stop_video", None).await
    }

    async fn delete_file(&self, filename: &str, section: Section) -> Result<(), ServiceError> {
        let url = self.endpoint(&[section.delete_route(), filename])?;
        studio_debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            studio_warn!("Delete of {} answered {}", filename, status);
        }
        response.bytes().await.map_err(map_reqwest_error)?;
        Ok(())
    }

    async fn delete_all_uploads(&self) -> Result<ActionReply, ServiceError> {
        self.post_action("delete_all_uploads", None).await
    }

    async fn get_status(&self) -> Result<StatusReport, ServiceError> {
        let url = self.endpoint(&["get_status"])?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn load_page(&self) -> Result<PageListing, ServiceError> {
        let url = self.endpoint(&[])?;
        studio_debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let decoded = decode_html(&bytes, content_type.as_deref())
            .map_err(|err| ServiceError::new(FailureKind::Decode, err.to_string()))?;
        Ok(parse_listing(&decoded.html))
    }

    async fn download_processed(
        &self,
        filename: &str,
        dir: &Path,
    ) -> Result<PathBuf, ServiceError> {
        let url = self.endpoint(&["download", filename])?;
        studio_debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_download_bytes;
        if let Some(declared) = response.content_length() {
            if declared > max_bytes {
                return Err(too_large(max_bytes, declared));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }

        AtomicFileWriter::new(dir.to_path_buf())
            .write(filename, &body)
            .map_err(|err| ServiceError::new(FailureKind::Io, err.to_string()))
    }

    fn stream_url(&self) -> Result<Url, ServiceError> {
        self.endpoint(&["video_feed"])
    }
}

/// Decodes a JSON action body whatever the HTTP status: the service answers
/// its own failures in JSON too. Anything else is a transport-class failure.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
    let status = response.status();
    let url = response.url().to_string();
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    if !status.is_success() {
        studio_warn!("{} answered {}", url, status);
    }
    serde_json::from_slice(&bytes).map_err(|err| {
        ServiceError::new(FailureKind::Decode, format!("{url} ({status}): {err}"))
    })
}

fn too_large(max_bytes: u64, actual: u64) -> ServiceError {
    ServiceError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "download too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return ServiceError::new(FailureKind::InvalidUrl, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}
