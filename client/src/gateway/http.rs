//! REST implementation of [`RecordStore`].
//!
//! Endpoints, relative to the configured collection URL:
//!
//! - `GET {base}` returns a JSON array of books
//! - `POST {base}` creates the book in the body
//! - `PUT {base}/{id}` replaces a book
//! - `DELETE {base}/{id}` removes a book
//!
//! Any non-2xx response is a [`NetworkError::Status`].

use super::RecordStore;
use crate::config::Config;
use crate::error::{NetworkError, Result};
use async_trait::async_trait;
use reqwest::{Method, Response, Url};
use shelf_engine::Book;
use std::time::Duration;

/// HTTP client for a book collection endpoint.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base: Url,
}

impl HttpGateway {
    /// Create a gateway for the collection at `base`.
    pub fn new(base: Url, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| NetworkError::Transport {
                url: base.to_string(),
                source,
            })?;

        Ok(Self { http, base })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone(), config.request_timeout)
    }

    /// URL of a single record. The identifier is percent-encoded as one
    /// path segment; a trailing slash on the base is ignored.
    pub fn record_url(&self, id: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| NetworkError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Book>) -> Result<Response> {
        tracing::debug!(%method, %url, "Sending request");

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(book) = body {
            request = request.json(book);
        }

        let response = request
            .send()
            .await
            .map_err(|source| NetworkError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                method,
                url: url.to_string(),
                status,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl RecordStore for HttpGateway {
    async fn fetch_all(&self) -> Result<Vec<Book>> {
        let url = self.base.clone();
        let response = self.send(Method::GET, url.clone(), None).await?;
        let text = response
            .text()
            .await
            .map_err(|source| NetworkError::Transport {
                url: url.to_string(),
                source,
            })?;

        let books: Vec<Book> = serde_json::from_str(&text).map_err(|source| NetworkError::Decode {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!(count = books.len(), "Fetched books");
        Ok(books)
    }

    async fn create(&self, book: &Book) -> Result<()> {
        self.send(Method::POST, self.base.clone(), Some(book)).await?;
        Ok(())
    }

    async fn update(&self, id: &str, book: &Book) -> Result<()> {
        let url = self.record_url(id)?;
        self.send(Method::PUT, url, Some(book)).await?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let url = self.record_url(id)?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base: &str) -> HttpGateway {
        HttpGateway::new(Url::parse(base).unwrap(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn record_url_appends_id() {
        let gw = gateway("http://localhost:5000/books");
        assert_eq!(
            gw.record_url("42").unwrap().as_str(),
            "http://localhost:5000/books/42"
        );
    }

    #[test]
    fn record_url_ignores_trailing_slash() {
        let gw = gateway("http://localhost:5000/api/books/");
        assert_eq!(
            gw.record_url("a-1").unwrap().as_str(),
            "http://localhost:5000/api/books/a-1"
        );
    }

    #[test]
    fn record_url_encodes_id() {
        let gw = gateway("http://localhost:5000/books");
        assert_eq!(
            gw.record_url("a/b c").unwrap().as_str(),
            "http://localhost:5000/books/a%2Fb%20c"
        );
    }
}
