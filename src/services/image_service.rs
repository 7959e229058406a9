//! Maps stored picture references to displayable URLs.
//!
//! Pictures are stored either as absolute URLs, `data:` URLs or paths relative
//! to the storefront origin (e.g. `/images/products/boot.png`).

use tracing::debug;

pub const DEFAULT_PLACEHOLDER_URL: &str =
    "https://via.placeholder.com/400x300?text=No+Image+Available";

const IMAGES_SEGMENT: &str = "/images/";

#[derive(Debug, Clone)]
pub struct ImageResolver {
    origin: String,
    placeholder: String,
}

impl ImageResolver {
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into().trim_end_matches('/').to_string();
        Self {
            origin,
            placeholder: DEFAULT_PLACEHOLDER_URL.to_string(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        if !placeholder.trim().is_empty() {
            self.placeholder = placeholder;
        }
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn placeholder_url(&self) -> &str {
        &self.placeholder
    }

    /// Resolves `path` against the storefront origin. Empty input maps to the
    /// placeholder; absolute and `data:` URLs pass through untouched.
    pub fn image_url(&self, path: Option<&str>) -> String {
        let Some(path) = path.map(str::trim).filter(|p| !p.is_empty()) else {
            return self.placeholder.clone();
        };

        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:")
        {
            return path.to_string();
        }

        if path.starts_with('/') {
            format!("{}{}", self.origin, path)
        } else {
            format!("{}/{}", self.origin, path)
        }
    }

    pub fn is_valid_image_url(&self, url: &str) -> bool {
        url.starts_with("http") || url.starts_with("data:") || url.starts_with('/')
    }

    /// Next URL to try after `original` failed to load.
    ///
    /// Tries, in order: plain `http` for any `https://localhost` URL, adding an
    /// `/images/` segment before the file name, then dropping it again.
    pub fn fallback_url(&self, original: &str) -> String {
        if original.trim().is_empty()
            || original.contains("data:")
            || original.contains(&self.placeholder)
            || original.contains("via.placeholder.com")
        {
            return self.placeholder.clone();
        }

        let resolved = self.image_url(Some(original));

        let alternative = if resolved.starts_with("https://localhost") {
            resolved.replacen("https://", "http://", 1)
        } else if !resolved.contains(IMAGES_SEGMENT) {
            let path_start = resolved.find("://").map(|i| i + 3).unwrap_or(0);
            match resolved.rfind('/') {
                Some(slash) if slash >= path_start && slash + 1 < resolved.len() => {
                    let (dir, file_name) = resolved.split_at(slash);
                    format!("{dir}{IMAGES_SEGMENT}{}", &file_name[1..])
                }
                _ => self.placeholder.clone(),
            }
        } else {
            resolved.replacen(IMAGES_SEGMENT, "/", 1)
        };

        debug!(original = %original, alternative = %alternative, "image fallback");
        alternative
    }
}
