//! Scheme-aware location type

use crate::error::{Error, Result};
use url::Url;

/// A storage location such as `/wh/t`, `hdfs://nn:8020/wh/t` or `s3a://bucket/t`.
///
/// Paths are normalized on construction: duplicate slashes collapse, `.`
/// segments drop, `..` pops a segment, and trailing slashes are removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoragePath {
    scheme: Option<String>,
    authority: Option<String>,
    path: String,
}

impl StoragePath {
    /// Parse a location string
    pub fn parse(location: &str) -> Result<Self> {
        let location = location.trim();
        if location.is_empty() {
            return Err(Error::invalid_path(
                location,
                "can not create a path from an empty string",
            ));
        }

        match location.split_once("://") {
            Some((scheme, rest)) => {
                Url::parse(location)
                    .map_err(|e| Error::invalid_path(location, format!("invalid URI: {e}")))?;
                let (authority, path) = match rest.find('/') {
                    Some(idx) => (&rest[..idx], &rest[idx..]),
                    None => (rest, "/"),
                };
                Ok(Self {
                    scheme: Some(scheme.to_ascii_lowercase()),
                    authority: (!authority.is_empty()).then(|| authority.to_string()),
                    path: normalize(path),
                })
            }
            None => Ok(Self {
                scheme: None,
                authority: None,
                path: normalize(location),
            }),
        }
    }

    /// Resolve `child` against this path.
    ///
    /// A child carrying its own scheme replaces this path entirely; an
    /// absolute child keeps this path's scheme and authority but replaces the
    /// path component; a relative child is appended.
    pub fn join(&self, child: &str) -> Result<Self> {
        let child = child.trim();
        if child.is_empty() {
            return Err(Error::invalid_path(
                self.to_string(),
                "can not join an empty child path",
            ));
        }
        if child.contains("://") {
            return Self::parse(child);
        }

        let path = if child.starts_with('/') {
            normalize(child)
        } else {
            normalize(&format!("{}/{child}", self.path))
        };
        Ok(Self {
            scheme: self.scheme.clone(),
            authority: self.authority.clone(),
            path,
        })
    }
}

impl std::fmt::Display for StoragePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}://")?;
            if let Some(authority) = &self.authority {
                write!(f, "{authority}")?;
            }
        }
        write!(f, "{}", self.path)
    }
}

fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}
