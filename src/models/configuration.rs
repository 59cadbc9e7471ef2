//! Image configuration of the catalog API.

use serde::{Deserialize, Serialize};

/// API configuration as returned by `/configuration`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Image hosting details
    pub images: ImagesConfiguration,
    /// Keys reported by the change feeds
    pub change_keys: Vec<String>,
}

/// Where images are served from and in which sizes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfiguration {
    pub base_url: String,
    pub secure_base_url: String,
    pub backdrop_sizes: Vec<String>,
    pub logo_sizes: Vec<String>,
    pub poster_sizes: Vec<String>,
    pub profile_sizes: Vec<String>,
    pub still_sizes: Vec<String>,
}

impl Configuration {
    /// Builds an HTTPS image URL such as `{secure_base_url}w500/abc.jpg`.
    ///
    /// Returns `None` if no secure base URL is known.
    pub fn image_url(&self, size: &str, path: &str) -> Option<String> {
        let base = self.images.secure_base_url.as_str();
        if base.is_empty() {
            return None;
        }

        Some(format!(
            "{}/{}/{}",
            base.trim_end_matches('/'),
            size.trim_matches('/'),
            path.trim_start_matches('/')
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_url() {
        let config: Configuration = serde_json::from_value(json!({
            "images": {
                "base_url": "http://image.tmdb.org/t/p/",
                "secure_base_url": "https://image.tmdb.org/t/p/",
                "poster_sizes": ["w92", "w500", "original"]
            },
            "change_keys": ["adult", "air_date"]
        }))
        .unwrap();

        assert_eq!(
            config.image_url("w500", "/kqjL17yufvn9OVLyXYpvtyrFfak.jpg").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/kqjL17yufvn9OVLyXYpvtyrFfak.jpg")
        );
        assert_eq!(config.images.poster_sizes.len(), 3);
    }

    #[test]
    fn test_image_url_without_base() {
        assert_eq!(Configuration::default().image_url("w92", "/a.jpg"), None);
    }
}
