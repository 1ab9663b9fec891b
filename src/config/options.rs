// src/config/options.rs
use std::ffi::OsString;
use std::path::{ Path, PathBuf };
use std::sync::Arc;
use std::time::Duration;

use super::consts::*;
use crate::{
    collection::{ IdPattern, Resolver },
    core::{ local::DirFetcher, net::{ Fetch, HttpFetcher } },
    errors::ParseError,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub site: SiteOptions,
    pub collection: CollectionOptions,
    pub facets: FacetOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            site: SiteOptions::default(),
            collection: CollectionOptions::default(),
            facets: FacetOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

/// Where the static site lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SiteSource {
    Dir(PathBuf),
    Http { host: String, port: u16, prefix: String },
}

impl SiteSource {
    /// Site bar text: `http://host[:port][/prefix]` or a directory path.
    pub fn parse(text: &str) -> Result<Self, String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(s!("Site is empty"));
        }
        let Some(rest) = text.strip_prefix("http://") else {
            if text.contains("://") {
                return Err(format!("Unsupported scheme: {text}"));
            }
            return Ok(SiteSource::Dir(PathBuf::from(text)));
        };

        let (authority, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, DEFAULT_PREFIX),
        };
        let (host, port) = match authority.rsplit_once(':') {
            Some((h, p)) => (h, p.parse::<u16>().map_err(|e| format!("Bad port '{p}': {e}"))?),
            None => (authority, DEFAULT_PORT),
        };
        if host.is_empty() {
            return Err(format!("Missing host: {text}"));
        }
        let prefix = if path.ends_with('/') { s!(path) } else { join!(path, "/") };
        Ok(SiteSource::Http { host: s!(host), port, prefix })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteOptions {
    pub source: SiteSource,
    /// URL of the authoring page; the collection link is derived from it.
    pub page_url: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            source: SiteSource::Dir(PathBuf::from(".")),
            page_url: join!("http://", DEFAULT_HOST, "/", AUTHOR_PAGE),
        }
    }
}

impl SiteOptions {
    /// Build the fetch capability for the configured source.
    pub fn fetcher(&self, timeout: Duration) -> Arc<dyn Fetch> {
        match &self.source {
            SiteSource::Dir(root) => Arc::new(DirFetcher::new(root.clone())),
            SiteSource::Http { host, port, prefix } => {
                Arc::new(HttpFetcher::new(host.clone(), *port, prefix.clone(), timeout))
            }
        }
    }

    /// Switch source and point the authoring page URL at it.
    pub fn set_source(&mut self, source: SiteSource) {
        self.page_url = match &source {
            SiteSource::Dir(root) => {
                let root = root.to_string_lossy().replace('\\', "/");
                join!("file://", root.trim_end_matches('/'), "/", AUTHOR_PAGE)
            }
            SiteSource::Http { host, port, prefix } if *port == DEFAULT_PORT => {
                join!("http://", host, prefix, AUTHOR_PAGE)
            }
            SiteSource::Http { host, port, prefix } => {
                format!("http://{host}:{port}{prefix}{AUTHOR_PAGE}")
            }
        };
        self.source = source;
    }

    /// Short human label for status lines.
    pub fn describe(&self) -> String {
        match &self.source {
            SiteSource::Dir(root) => format!("dir {}", root.display()),
            SiteSource::Http { host, port, prefix } => format!("http://{host}:{port}{prefix}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionOptions {
    pub id_pattern: String,
    pub record_path: String,
    pub max_in_flight: usize,
    pub fetch_timeout_ms: u64,
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self {
            id_pattern: s!(DEFAULT_ID_PATTERN),
            record_path: s!(RECORD_PATH),
            max_in_flight: MAX_IN_FLIGHT,
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

impl CollectionOptions {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn id_pattern(&self) -> Result<IdPattern, ParseError> {
        IdPattern::new(&self.id_pattern)
    }

    /// Resolver bound to this record layout.
    pub fn resolver(&self, fetch: Arc<dyn Fetch>) -> Resolver {
        Resolver::new(fetch)
            .with_record_path(&self.record_path)
            .with_max_in_flight(self.max_in_flight)
            .with_fetch_timeout(self.fetch_timeout())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacetOptions {
    pub table_path: String,
}

impl Default for FacetOptions {
    fn default() -> Self {
        Self { table_path: s!(FACET_TABLE_PATH) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    out_path: OutputPath,
    /// Page template to inject the collection into; standalone document if None.
    pub template: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_path: OutputPath::default(),
            template: None,
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let stem = self.out_path.file_stem.to_string_lossy();
        path.push(join!(&*stem, ".", &self.out_path.ext));
        path
    }

    /// Parse GUI/CLI text into dir + stem + ext. No extension → `.html`.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() {
            return;
        }

        let p = Path::new(s);
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.ext = p
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| s!("html"));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
    ext: String,
}

impl Default for OutputPath {
    fn default() -> Self {
        let default = Path::new(DEFAULT_FILE);
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: default.file_stem().map(|s| s.to_os_string()).unwrap_or_default(),
            ext: s!("html"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_text_forms() {
        assert_eq!(SiteSource::parse("./site").unwrap(), SiteSource::Dir(PathBuf::from("./site")));
        assert_eq!(
            SiteSource::parse("http://bbti.example:8080/bbti").unwrap(),
            SiteSource::Http { host: s!("bbti.example"), port: 8080, prefix: s!("/bbti/") }
        );
        assert_eq!(
            SiteSource::parse("http://bbti.example").unwrap(),
            SiteSource::Http { host: s!("bbti.example"), port: 80, prefix: s!("/") }
        );
        assert!(SiteSource::parse("https://bbti.example").is_err());
        assert!(SiteSource::parse("http://h:x/").is_err());
    }

    #[test]
    fn page_url_follows_source() {
        let mut site = SiteOptions::default();
        site.set_source(SiteSource::Http { host: s!("h"), port: 8080, prefix: s!("/b/") });
        assert_eq!(site.page_url, "http://h:8080/b/create_collection.html");
        site.set_source(SiteSource::Dir(PathBuf::from("/srv/site/")));
        assert_eq!(site.page_url, "file:///srv/site/create_collection.html");
    }

    #[test]
    fn out_path_defaults_to_html() {
        let mut export = ExportOptions::default();
        assert_eq!(export.out_path(), PathBuf::from("out").join("collection.html"));
        export.set_path("exports/bristol");
        assert_eq!(export.out_path(), PathBuf::from("exports").join("bristol.html"));
    }
}
