use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::utils::errors::CurseMetaError;

/// The services turn away requests that don't look like they come from a browser.
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Blocking GET access to the metadata services.
pub trait Transport {
    /// Fetches `url` and returns the body decoded as text.
    fn get_text(&self, url: &Url) -> Result<String>;

    /// Fetches `url` and returns the raw body, ready for JSON decoding.
    fn get_bytes(&self, url: &Url) -> Result<Vec<u8>>;

    /// Streams the body of `url` into `path`, replacing any existing file.
    fn download_to_file(&self, url: &Url, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    fn send(&self, url: &Url) -> Result<reqwest::blocking::Response> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!(CurseMetaError::RequestFailed(
                url.to_string(),
                response.status()
            )));
        }

        Ok(response)
    }
}

impl Transport for HttpTransport {
    fn get_text(&self, url: &Url) -> Result<String> {
        self.send(url)?
            .text()
            .with_context(|| format!("Failed to read response body from {}", url))
    }

    fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        let bytes = self
            .send(url)?
            .bytes()
            .with_context(|| format!("Failed to read response body from {}", url))?;
        Ok(bytes.to_vec())
    }

    fn download_to_file(&self, url: &Url, path: &Path) -> Result<()> {
        let mut response = self.send(url)?;

        let file = File::create(path)
            .map_err(CurseMetaError::from)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        let result = response
            .copy_to(&mut writer)
            .with_context(|| format!("Failed to download {} to {}", url, path.display()))
            .and_then(|_| {
                writer
                    .flush()
                    .map_err(CurseMetaError::from)
                    .with_context(|| format!("Failed to write file: {}", path.display()))
            });

        if result.is_err() {
            // Don't leave a truncated file behind.
            drop(writer);
            if let Err(err) = fs::remove_file(path) {
                warn!("Failed to remove partial download {}: {}", path.display(), err);
            }
        }

        result
    }
}

#[derive(Debug, Default)]
pub struct HttpTransportBuilder {
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl HttpTransportBuilder {
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Overrides reqwest's default per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<HttpTransport> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(CurseMetaError::from)
            .context("Failed to build HTTP client")?;

        Ok(HttpTransport { client })
    }
}

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;

#[cfg(any(test, feature = "mock"))]
mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Serves canned bodies by URL path and remembers every URL it was asked for.
    ///
    /// Clones share the request log, so a test can keep a handle after moving
    /// the transport into a client.
    #[derive(Debug, Default, Clone)]
    pub struct MockTransport {
        responses: HashMap<String, Vec<u8>>,
        requests: Rc<RefCell<Vec<Url>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(mut self, path: &str, body: impl Into<Vec<u8>>) -> Self {
            self.responses.insert(path.to_string(), body.into());
            self
        }

        pub fn requests(&self) -> Vec<Url> {
            self.requests.borrow().clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }

        fn respond(&self, url: &Url) -> Result<Vec<u8>> {
            self.requests.borrow_mut().push(url.clone());
            self.responses.get(url.path()).cloned().ok_or_else(|| {
                anyhow!(CurseMetaError::RequestFailed(
                    url.to_string(),
                    reqwest::StatusCode::NOT_FOUND
                ))
            })
        }
    }

    impl Transport for MockTransport {
        fn get_text(&self, url: &Url) -> Result<String> {
            let body = self.respond(url)?;
            String::from_utf8(body).context("Response body is not valid UTF-8")
        }

        fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
            self.respond(url)
        }

        fn download_to_file(&self, url: &Url, path: &Path) -> Result<()> {
            let body = self.respond(url)?;
            std::fs::write(path, body)
                .map_err(CurseMetaError::from)
                .with_context(|| format!("Failed to write file: {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use predicates::prelude::*;
    use std::io::{BufRead, BufReader, Read};
    use std::net::{Shutdown, TcpListener};
    use std::sync::mpsc;
    use std::thread;

    /// Answers a single request with `status` and `body`, reporting the request head.
    fn serve_once(status: &'static str, body: &'static str) -> (Url, mpsc::Receiver<String>) {
        serve_raw(format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        ))
    }

    /// Writes `response` verbatim to the first connection, then closes the write half.
    fn serve_raw(response: String) -> (Url, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut head = String::new();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                head.push_str(&line);
            }
            tx.send(head).unwrap();

            stream.write_all(response.as_bytes()).unwrap();
            let _ = stream.shutdown(Shutdown::Write);
            let _ = stream.read(&mut [0; 1]);
        });

        let url = Url::parse(&format!("http://{}/api/v2/addon/1/description", addr)).unwrap();
        (url, rx)
    }

    #[test]
    fn test_get_text_sends_browser_user_agent() {
        let (url, head) = serve_once("200 OK", "<p>Hello</p>");
        let transport = HttpTransport::new().unwrap();

        let body = transport.get_text(&url).unwrap();
        assert_eq!(body, "<p>Hello</p>");

        let head = head.recv().unwrap().to_lowercase();
        assert!(head.starts_with("get /api/v2/addon/1/description"));
        assert!(head.contains("user-agent: mozilla/5.0"));
    }

    #[test]
    fn test_get_bytes_fails_on_error_status() {
        let (url, _head) = serve_once("404 Not Found", "missing");
        let transport = HttpTransport::new().unwrap();

        let err = transport.get_bytes(&url).unwrap_err();
        match err.downcast_ref::<CurseMetaError>() {
            Some(CurseMetaError::RequestFailed(_, status)) => assert_eq!(status.as_u16(), 404),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_download_to_file_overwrites_existing_file() {
        let (url, _head) = serve_once("200 OK", "jar contents");
        let temp = assert_fs::TempDir::new().unwrap();
        let target = temp.child("mod.jar");
        target.write_str("stale contents that are longer").unwrap();

        let transport = HttpTransport::new().unwrap();
        transport.download_to_file(&url, target.path()).unwrap();

        target.assert("jar contents");
    }

    #[test]
    fn test_download_to_file_fails_for_unwritable_path() {
        let (url, _head) = serve_once("200 OK", "jar contents");
        let temp = assert_fs::TempDir::new().unwrap();
        let target = temp.child("missing-dir").child("mod.jar");

        let transport = HttpTransport::new().unwrap();
        let err = transport.download_to_file(&url, target.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CurseMetaError>(),
            Some(CurseMetaError::IoError(_))
        ));
        target.assert(predicate::path::missing());
    }

    #[test]
    fn test_download_to_file_removes_truncated_file() {
        let (url, _head) = serve_raw(
            "HTTP/1.1 200 OK\r\nContent-Length: 1024\r\nConnection: close\r\n\r\nonly part"
                .to_string(),
        );
        let temp = assert_fs::TempDir::new().unwrap();
        let target = temp.child("mod.jar");
        target.write_str("previous download").unwrap();

        let transport = HttpTransport::new().unwrap();
        assert!(transport.download_to_file(&url, target.path()).is_err());
        target.assert(predicate::path::missing());
    }

    #[test]
    fn test_mock_transport_records_requests() {
        let transport = MockTransport::new().with_response("/a", "body");
        let url = Url::parse("https://example.invalid/a?x=1").unwrap();

        assert_eq!(transport.get_text(&url).unwrap(), "body");
        assert!(transport
            .get_text(&Url::parse("https://example.invalid/b").unwrap())
            .is_err());
        assert_eq!(transport.request_count(), 2);
        assert_eq!(transport.requests()[0], url);
    }
}
