//! Product documents and the sources they are retrieved from.
//!
//! A product is the JSON document published for each issued bulletin, with
//! the bulletin itself in `productText`. Retrieval sits behind the
//! [`ProductSource`] trait; [`CachedProductSource`] serves products saved to a
//! directory as `{LOCATION}-{YYYYMMDDTHHMMSSZ}.json`.

use crate::constants::{PARSED_FILE_SUFFIX, PRODUCT_FILE_EXTENSION};
use crate::error::{ForecastError, Result};
use crate::models::RegionForecast;
use crate::parser::BulletinParser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Product document as published alongside a bulletin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEnvelope {
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuing_office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuance_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub product_text: String,
}

impl ProductEnvelope {
    /// Wrap bare bulletin text
    pub fn from_text(product_text: impl Into<String>) -> Self {
        Self {
            url: None,
            id: None,
            issuing_office: None,
            issuance_time: None,
            product_code: None,
            product_name: None,
            product_text: product_text.into(),
        }
    }

    /// Decode a product document; `origin` names the source in errors
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ForecastError::invalid_product(origin, e.to_string()))
    }

    /// Read and decode a product document from disk
    pub async fn from_path(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ForecastError::ProductNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ForecastError::Io(e)
            }
        })?;
        Self::from_json_str(&json, path)
    }

    /// Parse the bulletin carried by this product
    pub fn parse(&self, parser: &BulletinParser) -> RegionForecast {
        parser.parse(&self.product_text)
    }
}

/// Somewhere products can be listed and fetched from
pub trait ProductSource: Send + Sync {
    /// Issuing locations for which products are available
    fn locations(&self) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Most recent product for a location
    fn latest(&self, location: &str) -> impl Future<Output = Result<ProductEnvelope>> + Send;
}

/// Fetch the newest product for a location and parse it
pub async fn parse_latest<S: ProductSource>(
    source: &S,
    parser: &BulletinParser,
    location: &str,
) -> Result<RegionForecast> {
    let product = source.latest(location).await?;
    Ok(product.parse(parser))
}

/// Product source backed by a directory of saved product documents
#[derive(Debug, Clone)]
pub struct CachedProductSource {
    root: PathBuf,
}

impl CachedProductSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Cached product files for a location, oldest first
    pub fn product_files(&self, location: &str) -> Result<Vec<PathBuf>> {
        let pattern = format!(
            "{}/{}-*.{}",
            glob::Pattern::escape(&self.root.to_string_lossy()),
            glob::Pattern::escape(location),
            PRODUCT_FILE_EXTENSION
        );
        debug!("Searching for products with pattern: {}", pattern);

        let mut files: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(|entry| entry.ok())
            .filter(|path| !is_parsed_output(path))
            .collect();
        files.sort();
        Ok(files)
    }

    /// Save a product under the cache naming scheme, returning its path
    pub async fn store(
        &self,
        location: &str,
        product: &ProductEnvelope,
        retrieved_at: DateTime<Utc>,
    ) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(cache_file_name(location, retrieved_at));
        let json = serde_json::to_string_pretty(product)?;
        tokio::fs::write(&path, json).await?;
        info!("Stored product for {} at {}", location, path.display());
        Ok(path)
    }
}

impl ProductSource for CachedProductSource {
    async fn locations(&self) -> Result<Vec<String>> {
        let mut locations = BTreeSet::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if is_parsed_output(&path)
                || path.extension().and_then(|e| e.to_str()) != Some(PRODUCT_FILE_EXTENSION)
            {
                continue;
            }
            let location = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.rsplit_once('-'))
                .map(|(location, _)| location.to_string());
            if let Some(location) = location {
                locations.insert(location);
            }
        }

        Ok(locations.into_iter().collect())
    }

    async fn latest(&self, location: &str) -> Result<ProductEnvelope> {
        let files = self.product_files(location)?;
        let Some(newest) = files.last() else {
            return Err(ForecastError::NoProducts {
                location: location.to_string(),
                searched: self.root.clone(),
            });
        };

        debug!(
            "Using {} of {} cached products for {}",
            newest.display(),
            files.len(),
            location
        );
        ProductEnvelope::from_path(newest).await
    }
}

/// File name for a product retrieved at `retrieved_at`
pub fn cache_file_name(location: &str, retrieved_at: DateTime<Utc>) -> String {
    format!(
        "{}-{}.{}",
        location,
        retrieved_at.format("%Y%m%dT%H%M%SZ"),
        PRODUCT_FILE_EXTENSION
    )
}

/// Whether a path is a parser output written next to cached products
pub fn is_parsed_output(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(PARSED_FILE_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_envelope_decodes_api_fields() {
        let json = r#"{
            "@id": "https://api.weather.gov/products/abc",
            "id": "abc",
            "wmoCollectiveId": "FZUS51",
            "issuingOffice": "KBOX",
            "issuanceTime": "2024-01-15T08:30:00+00:00",
            "productCode": "CWF",
            "productName": "Coastal Waters Forecast",
            "productText": "HEADER\n$$"
        }"#;

        let product = ProductEnvelope::from_json_str(json, Path::new("inline")).unwrap();
        assert_eq!(product.url.as_deref(), Some("https://api.weather.gov/products/abc"));
        assert_eq!(product.issuing_office.as_deref(), Some("KBOX"));
        assert_eq!(product.product_code.as_deref(), Some("CWF"));
        assert_eq!(product.product_text, "HEADER\n$$");
    }

    #[test]
    fn test_envelope_requires_product_text() {
        let error = ProductEnvelope::from_json_str(r#"{"id": "abc"}"#, Path::new("broken.json"))
            .unwrap_err();

        match error {
            ForecastError::InvalidProduct { path, reason } => {
                assert_eq!(path, PathBuf::from("broken.json"));
                assert!(reason.contains("productText"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cache_file_name() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 5).unwrap();
        assert_eq!(cache_file_name("BOX", at), "BOX-20240115T083005Z.json");
    }

    #[test]
    fn test_is_parsed_output() {
        assert!(is_parsed_output(Path::new("/tmp/BOX-20240115T083005Z.parsed.json")));
        assert!(!is_parsed_output(Path::new("/tmp/BOX-20240115T083005Z.json")));
    }
}
