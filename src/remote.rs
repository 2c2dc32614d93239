//! Access to remote cache files
//!
//! The update workflow only needs two things from a source: the size of its
//! cache file and the file itself. [`RemoteSource`] is that seam; [`HttpRemote`]
//! implements it over a blocking reqwest client.

use std::io::{Read, Write};

use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_LENGTH;

use crate::error::{Result, remote as remote_error};
use crate::progress::ProgressReporter;

const USER_AGENT: &str = concat!("cache-merger/", env!("CARGO_PKG_VERSION"));

const CHUNK_SIZE: usize = 64 * 1024;

pub trait RemoteSource {
    /// Byte size of the file at `url`, read without downloading its content
    fn content_length(&self, url: &str) -> Result<u64>;

    /// Stream the file at `url` into `out`, returning the number of bytes written
    fn download(
        &self,
        url: &str,
        out: &mut dyn Write,
        progress: &mut dyn ProgressReporter,
    ) -> Result<u64>;
}

/// HTTP(S) sources
pub struct HttpRemote {
    client: Client,
}

impl HttpRemote {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| remote_error::request_failed("<client>", e))?;
        Ok(Self { client })
    }

    fn get(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| remote_error::request_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(remote_error::http_status(url, status.as_u16()));
        }
        Ok(response)
    }
}

impl RemoteSource for HttpRemote {
    fn content_length(&self, url: &str) -> Result<u64> {
        // Only the headers are read; the body is dropped with the response.
        let response = self.get(url)?;
        response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .ok_or_else(|| remote_error::missing_content_length(url))
    }

    fn download(
        &self,
        url: &str,
        out: &mut dyn Write,
        progress: &mut dyn ProgressReporter,
    ) -> Result<u64> {
        let mut response = self.get(url)?;
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut written = 0u64;

        loop {
            let n = response
                .read(&mut buf)
                .map_err(|e| remote_error::download_failed(url, e))?;
            if n == 0 {
                break;
            }
            out.write_all(&buf[..n])
                .map_err(|e| remote_error::download_failed(url, e))?;
            written += n as u64;
            progress.advance(n as u64);
        }

        out.flush()
            .map_err(|e| remote_error::download_failed(url, e))?;
        Ok(written)
    }
}
