//! OCR endpoint client.
//!
//! [`OcrClient`] is the seam between the dispatcher and the network so the
//! dispatcher can be driven by a fake in tests.

use crate::config::OcrConfig;
use crate::error::UploadError;
use crate::intake::DocumentSource;
use crate::upload::types::UploadDocument;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::info;

#[async_trait::async_trait]
pub trait OcrClient: Send + Sync {
    async fn recognize(&self, document: &UploadDocument) -> Result<Value, UploadError>;
}

pub struct HttpOcrClient {
    client: reqwest::Client,
    config: OcrConfig,
}

impl HttpOcrClient {
    pub fn new(config: OcrConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn query(&self) -> [(&'static str, &str); 2] {
        [
            ("doc_type", self.config.doc_type.as_str()),
            ("lang", self.config.lang.as_str()),
        ]
    }

    fn classify(&self, err: reqwest::Error) -> UploadError {
        if err.is_timeout() {
            UploadError::Timeout {
                ms: self.config.timeout_ms,
            }
        } else {
            UploadError::Transport(err.to_string())
        }
    }
}

/// Loads the bytes behind a document, if it has any.
async fn read_source(document: &UploadDocument) -> Result<Vec<u8>, UploadError> {
    match &document.source {
        Some(DocumentSource::Path(path)) => {
            tokio::fs::read(path).await.map_err(|e| UploadError::Read {
                path: path.clone(),
                reason: e.to_string(),
            })
        }
        Some(DocumentSource::Bytes(bytes)) => Ok(bytes.to_vec()),
        None => Err(UploadError::InvalidInput {
            name: document.name.clone(),
        }),
    }
}

#[async_trait::async_trait]
impl OcrClient for HttpOcrClient {
    async fn recognize(&self, document: &UploadDocument) -> Result<Value, UploadError> {
        let bytes = read_source(document).await?;
        info!("Uploading '{}' ({} bytes)", document.name, bytes.len());

        let part = Part::bytes(bytes)
            .file_name(document.name.clone())
            .mime_str(document.mime_type())
            .map_err(|e| UploadError::Transport(e.to_string()))?;
        let form = Form::new().part("docs", part);

        let mut request = self
            .client
            .post(self.config.endpoint())
            .query(&self.query())
            .multipart(form);
        if let Some(timeout) = self.config.timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&body).map_err(|e| UploadError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    #[tokio::test]
    async fn reads_in_memory_bytes() {
        let doc = UploadDocument {
            name: "a.png".into(),
            source: Some(DocumentSource::Bytes(Arc::from(&b"png"[..]))),
        };
        assert_eq!(read_source(&doc).await.unwrap(), b"png".to_vec());
    }

    #[tokio::test]
    async fn missing_source_is_invalid_input() {
        let doc = UploadDocument {
            name: "ghost.pdf".into(),
            source: None,
        };
        let err = read_source(&doc).await.unwrap_err();
        assert!(matches!(err, UploadError::InvalidInput { name } if name == "ghost.pdf"));
    }

    #[tokio::test]
    async fn unreadable_path_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let doc = UploadDocument {
            name: "gone.pdf".into(),
            source: Some(DocumentSource::Path(dir.path().join("gone.pdf"))),
        };
        assert!(matches!(
            read_source(&doc).await.unwrap_err(),
            UploadError::Read { .. }
        ));
    }

    #[test]
    fn query_uses_configured_values() {
        let client = HttpOcrClient::new(OcrConfig {
            lang: "ar".into(),
            ..OcrConfig::default()
        });
        assert_eq!(client.query(), [("doc_type", "ocr"), ("lang", "ar")]);
    }

    #[test]
    fn mime_follows_extension() {
        let doc = |name: &str| UploadDocument {
            name: name.into(),
            source: None,
        };
        assert_eq!(doc("invoice.PDF").mime_type(), "application/pdf");
        assert_eq!(doc("scan.jpeg").mime_type(), "image/jpeg");
        assert_eq!(doc("notes").mime_type(), "application/octet-stream");
    }

    /// Answers one request with `response` and hands back the raw request.
    async fn serve_once(response: &'static str) -> (OcrConfig, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });
        let config = OcrConfig {
            base_url: format!("http://{addr}"),
            ..OcrConfig::default()
        };
        (config, server)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok());
            let done = match length {
                Some(length) => buf.len() >= end + 4 + length,
                None => buf.ends_with(b"0\r\n\r\n"),
            };
            if done {
                break;
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn invoice() -> UploadDocument {
        UploadDocument {
            name: "invoice.pdf".into(),
            source: Some(DocumentSource::Bytes(Arc::from(&b"%PDF-1.7"[..]))),
        }
    }

    #[tokio::test]
    async fn posts_the_document_as_docs_and_parses_json() {
        let (config, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 27\r\nConnection: close\r\n\r\n{\"pages\": 2, \"text\": \"...\"}",
        )
        .await;

        let value = HttpOcrClient::new(config).recognize(&invoice()).await.unwrap();
        assert_eq!(value, serde_json::json!({"pages": 2, "text": "..."}));

        let request = server.await.unwrap();
        assert!(
            request.starts_with("POST /api/v1/ocr?doc_type=ocr&lang=auto HTTP/1.1\r\n"),
            "got: {request}"
        );
        assert!(request.contains("name=\"docs\""), "got: {request}");
        assert!(request.contains("filename=\"invoice.pdf\""));
        assert!(request.contains("application/pdf"));
        assert!(request.contains("%PDF-1.7"));
    }

    #[tokio::test]
    async fn server_error_becomes_status_error() {
        let (config, server) = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\nboom",
        )
        .await;

        let err = HttpOcrClient::new(config).recognize(&invoice()).await.unwrap_err();
        assert!(
            matches!(&err, UploadError::Status { status: 500, body } if body == "boom"),
            "got: {err:?}"
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn non_json_body_is_decode_error() {
        let (config, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 8\r\nConnection: close\r\n\r\nnot json",
        )
        .await;

        let err = HttpOcrClient::new(config).recognize(&invoice()).await.unwrap_err();
        assert!(matches!(err, UploadError::Decode(_)), "got: {err:?}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpOcrClient::new(OcrConfig {
            base_url: format!("http://{addr}"),
            ..OcrConfig::default()
        });
        let err = client.recognize(&invoice()).await.unwrap_err();
        assert!(matches!(err, UploadError::Transport(_)), "got: {err:?}");
    }
}
