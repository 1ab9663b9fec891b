// src/core/net.rs

// HTTP/1.0 GET over TCP (std-only), behind the `Fetch` capability.

use std::{
    io::{ Read, Write },
    net::{ TcpStream, ToSocketAddrs },
    time::Duration,
};

use crate::config::consts::{ MAX_REDIRECTS, USER_AGENT };
use crate::errors::FetchError;

/// Retrieve a site-relative resource as text.
/// Implementations must be callable from worker threads.
pub trait Fetch: Send + Sync {
    fn get_text(&self, path: &str) -> Result<String, FetchError>;
}

/// Static site served over plain HTTP.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    host: String,
    port: u16,
    prefix: String,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(host: String, port: u16, prefix: String, timeout: Duration) -> Self {
        let mut prefix = prefix;
        if !prefix.starts_with('/') { prefix.insert(0, '/'); }
        if !prefix.ends_with('/') { prefix.push('/'); }
        Self { host, port, prefix, timeout }
    }

    /// Absolute request path for a site-relative one.
    pub fn full_path(&self, path: &str) -> String {
        join!(&self.prefix, path.trim_start_matches('/'))
    }

    fn get_once(&self, full: &str) -> Result<Response, FetchError> {
        let addr = (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| FetchError::Malformed { path: s!(full), reason: format!("cannot resolve {}", self.host) })?;

        let mut s = TcpStream::connect_timeout(&addr, self.timeout)
            .map_err(|e| FetchError::from_io(e, full))?;
        s.set_read_timeout(Some(self.timeout))?;
        s.set_write_timeout(Some(self.timeout))?;

        let req = format!(
            "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: {}\r\nAccept: text/html, application/json\r\nConnection: close\r\n\r\n",
            full, self.host, USER_AGENT
        );
        s.write_all(req.as_bytes()).map_err(|e| FetchError::from_io(e, full))?;
        s.flush()?;

        let mut buf = Vec::new();
        s.read_to_end(&mut buf).map_err(|e| FetchError::from_io(e, full))?;
        parse_response(&buf, full)
    }
}

impl Fetch for HttpFetcher {
    fn get_text(&self, path: &str) -> Result<String, FetchError> {
        let mut full = self.full_path(path);

        for _ in 0..=MAX_REDIRECTS {
            let resp = self.get_once(&full)?;
            match resp.status {
                200 => return Ok(resp.body),
                301 | 302 | 303 | 307 | 308 => {
                    let loc = resp.location.ok_or_else(|| FetchError::Malformed {
                        path: full.clone(),
                        reason: s!("redirect without Location"),
                    })?;
                    logd!("Net: {} redirected → {}", full, loc);
                    full = self.redirect_target(&full, &loc)?;
                }
                _ => return Err(FetchError::Status { status: resp.status_line, path: full }),
            }
        }
        Err(FetchError::Redirect(full))
    }
}

impl HttpFetcher {
    /// Only same-host redirects are followed.
    fn redirect_target(&self, current: &str, loc: &str) -> Result<String, FetchError> {
        if let Some(rest) = loc.strip_prefix("http://") {
            let (authority, path) = rest.split_at(rest.find('/').unwrap_or(rest.len()));
            let host = authority.split(':').next().unwrap_or("");
            if !host.eq_ignore_ascii_case(&self.host) {
                return Err(FetchError::Redirect(s!(loc)));
            }
            return Ok(if path.is_empty() { s!("/") } else { s!(path) });
        }
        if loc.contains("://") {
            return Err(FetchError::Redirect(s!(loc)));
        }
        if loc.starts_with('/') {
            return Ok(s!(loc));
        }
        // relative to the current directory
        let dir = &current[..current.rfind('/').map(|i| i + 1).unwrap_or(0)];
        Ok(join!(dir, loc))
    }
}

#[derive(Debug)]
struct Response {
    status: u16,
    status_line: String,
    location: Option<String>,
    body: String,
}

fn parse_response(buf: &[u8], path: &str) -> Result<Response, FetchError> {
    let resp = String::from_utf8_lossy(buf);
    let malformed = |reason: &str| FetchError::Malformed { path: s!(path), reason: s!(reason) };

    let head_end = resp.find("\r\n\r\n").ok_or_else(|| malformed("missing header terminator"))?;
    let head = &resp[..head_end];
    let mut lines = head.split("\r\n");

    let status_line = s!(lines.next().unwrap_or(""));
    let status: u16 = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|c| c.parse().ok())
        .ok_or_else(|| malformed("bad status line"))?;

    let location = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("location"))
        .map(|(_, v)| s!(v.trim()));

    Ok(Response { status, status_line, location, body: resp[head_end + 4..].to_string() })
}
