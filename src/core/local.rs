// src/core/local.rs

// Static site read straight from a directory on disk.

use std::{ fs, io, path::{ Component, Path, PathBuf } };

use super::net::Fetch;
use crate::errors::FetchError;

#[derive(Clone, Debug)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a site-relative path below the root; `..`/absolute parts are refused.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let rel = Path::new(path.trim_start_matches('/'));
        let mut out = self.root.clone();
        for comp in rel.components() {
            match comp {
                Component::Normal(part) => out.push(part),
                Component::CurDir => {}
                _ => return Err(FetchError::OutsideRoot(s!(path))),
            }
        }
        Ok(out)
    }
}

impl Fetch for DirFetcher {
    fn get_text(&self, path: &str) -> Result<String, FetchError> {
        let full = self.resolve(path)?;
        match fs::read(&full) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(FetchError::NotFound(s!(path))),
            Err(e) => Err(FetchError::Io(e)),
        }
    }
}
