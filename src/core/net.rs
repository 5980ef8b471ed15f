// src/core/net.rs
//
// Page fetching. One blocking GET per tracked item, bounded by a timeout.
// Anything other than a 2xx answer with a readable body is a FetchError.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::USER_AGENT;
use crate::error::{ConfigError, FetchError};

pub trait Fetcher: Sync {
    /// Return the raw page markup for `url`.
    fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }
}

fn classify(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout { url: s!(url) }
    } else {
        FetchError::Network { url: s!(url), reason: err.to_string() }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| classify(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
        }

        resp.text().map_err(|e| match classify(url, e) {
            FetchError::Network { url, reason } => FetchError::Body { url, reason },
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Local fetcher that never goes through a proxy.
    fn fetcher() -> HttpFetcher {
        HttpFetcher { client: Client::builder().no_proxy().build().unwrap() }
    }

    /// Serve one connection on a free port; `respond` gets the accepted stream.
    fn serve_once(respond: impl FnOnce(std::net::TcpStream) + Send + 'static) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                respond(stream);
            }
        });
        format!("http://{addr}/item")
    }

    fn read_request(stream: &mut std::net::TcpStream) {
        let mut buf = [0u8; 1024];
        let mut seen = Vec::new();
        while !seen.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => seen.extend_from_slice(&buf[..n]),
            }
        }
    }

    #[test]
    fn non_2xx_is_a_status_error() {
        let url = serve_once(|mut stream| {
            read_request(&mut stream);
            let _ = stream.write_all(
                b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
        });

        match fetcher().fetch(&url, Duration::from_secs(5)) {
            Err(FetchError::Status { status, url: u }) => {
                assert_eq!(status, 503);
                assert_eq!(u, url);
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn silent_server_is_a_timeout() {
        let url = serve_once(|mut stream| {
            read_request(&mut stream);
            thread::sleep(Duration::from_secs(3));
            drop(stream);
        });

        match fetcher().fetch(&url, Duration::from_millis(200)) {
            Err(FetchError::Timeout { url: u }) => assert_eq!(u, url),
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[test]
    fn ok_answer_returns_the_body() {
        let url = serve_once(|mut stream| {
            read_request(&mut stream);
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 9\r\nConnection: close\r\n\r\n<p>hi</p>",
            );
        });

        assert_eq!(fetcher().fetch(&url, Duration::from_secs(5)).unwrap(), "<p>hi</p>");
    }
}
