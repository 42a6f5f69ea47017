//! Submitting records to the renderer

use crate::config::BatchConfig;
use crate::error::{BatchError, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;

/// Sends one record and returns the rendered PDF
pub trait Submitter {
    fn submit(&mut self, payload: &Value) -> Result<Vec<u8>>;
}

/// Posts records as JSON to the HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: Client,
    endpoint: String,
}

impl HttpSubmitter {
    /// Build a client for the configured endpoint
    ///
    /// The timeout is always set on the builder: `None` clears reqwest's
    /// 30 second default so a request can wait indefinitely.
    pub fn new(config: &BatchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BatchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl Submitter for HttpSubmitter {
    fn submit(&mut self, payload: &Value) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .map_err(|e| BatchError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BatchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| BatchError::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;
    use std::time::{Duration, Instant};

    /// Read one HTTP request (headers plus a Content-Length body)
    fn read_request(stream: &mut TcpStream) -> Vec<u8> {
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                return request;
            }
            request.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&request).to_lowercase();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .map(|value| value.trim().parse::<usize>().unwrap())
                    .unwrap_or(0);
                if request.len() >= end + 4 + length {
                    return request;
                }
            }
        }
    }

    /// Accept one connection, read the request and answer with `body`
    /// after `delay`. Returns the endpoint URL.
    fn slow_server(delay: Duration, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            read_request(&mut stream);
            thread::sleep(delay);
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/pdf\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            // The client may already have given up
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        });
        format!("http://{addr}/generate-lc-draft-pdf/")
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) is not expected to be listening
        let config = BatchConfig::default()
            .with_endpoint("http://127.0.0.1:9/generate-lc-draft-pdf/")
            .with_request_timeout(Some(Duration::from_secs(2)));
        let mut submitter = HttpSubmitter::new(&config).unwrap();

        let err = submitter.submit(&json!({})).unwrap_err();
        assert!(matches!(err, BatchError::Transport(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_posts_to_configured_endpoint() {
        let endpoint = slow_server(Duration::ZERO, b"%PDF-1.4");
        let config = BatchConfig::default().with_endpoint(endpoint);
        let mut submitter = HttpSubmitter::new(&config).unwrap();

        let body = submitter.submit(&json!({"applicant": "Acme Corp"})).unwrap();
        assert_eq!(body, b"%PDF-1.4");
    }

    #[test]
    fn test_request_timeout_cuts_off_slow_server() {
        let endpoint = slow_server(Duration::from_secs(10), b"%PDF-1.4");
        let config = BatchConfig::default()
            .with_endpoint(endpoint)
            .with_request_timeout(Some(Duration::from_millis(300)));
        let mut submitter = HttpSubmitter::new(&config).unwrap();

        let start = Instant::now();
        let err = submitter.submit(&json!({})).unwrap_err();
        assert!(matches!(err, BatchError::Transport(_)));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_no_request_timeout_outlasts_client_default() {
        // reqwest's blocking client gives up after 30 s unless told otherwise
        let endpoint = slow_server(Duration::from_secs(32), b"%PDF-1.4");
        let config = BatchConfig::default()
            .with_endpoint(endpoint)
            .with_request_timeout(None);
        let mut submitter = HttpSubmitter::new(&config).unwrap();

        let body = submitter.submit(&json!({})).unwrap();
        assert_eq!(body, b"%PDF-1.4");
    }
}
