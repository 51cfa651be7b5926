use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use tracing::{debug, info};

use crate::catalog::client::{CatalogClient, OP_LIST_IMAGES};
use crate::catalog::outcome::Fetched;
use crate::error::{ApiError, ApiResult};
use crate::helpers::time::get_instant;
use crate::utils::constants::PLACEHOLDER_IMAGE;

/// One entry of `GET /products/{id}/images?includeContent=true`.
///
/// Only the two image sources are read; other upstream fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub image_content_base64: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Inline { mime: &'static str, payload: String },
    Remote(String),
    Placeholder,
}

impl ImageRef {
    /// String form handed to the rendering layer.
    pub fn to_reference(&self) -> String {
        match self {
            ImageRef::Inline { mime, payload } => format!("data:{};base64,{}", mime, payload),
            ImageRef::Remote(url) => url.clone(),
            ImageRef::Placeholder => PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl ImageRecord {
    /// First match wins: inline bytes, then an absolute http(s) URL.
    pub fn resolve(&self) -> Option<ImageRef> {
        self.inline().or_else(|| self.remote())
    }

    fn inline(&self) -> Option<ImageRef> {
        let payload = self.image_content_base64.as_deref()?.trim();
        if payload.is_empty() {
            return None;
        }
        let bytes = STANDARD.decode(payload).ok()?;
        if bytes.is_empty() {
            return None;
        }
        Some(ImageRef::Inline {
            mime: sniff_mime(&bytes),
            payload: payload.to_string(),
        })
    }

    fn remote(&self) -> Option<ImageRef> {
        let url = self.image_url.as_deref()?.trim();
        let lower = url.to_ascii_lowercase();
        (lower.starts_with("https://") || lower.starts_with("http://"))
            .then(|| ImageRef::Remote(url.to_string()))
    }
}

/// Ordered, never-empty image references for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImageSet {
    pub product_id: String,
    pub images: Vec<ImageRef>,
}

impl ProductImageSet {
    pub fn placeholder(product_id: &str) -> Self {
        Self {
            product_id: product_id.to_string(),
            images: vec![ImageRef::Placeholder],
        }
    }

    /// Drops unusable records; substitutes the placeholder when none is left.
    pub fn resolve(product_id: &str, records: &[ImageRecord]) -> Self {
        let images: Vec<ImageRef> = records.iter().filter_map(ImageRecord::resolve).collect();
        if images.is_empty() {
            return Self::placeholder(product_id);
        }
        Self {
            product_id: product_id.to_string(),
            images,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.images.as_slice(), [ImageRef::Placeholder])
    }

    pub fn references(&self) -> Vec<String> {
        self.images.iter().map(ImageRef::to_reference).collect()
    }
}

impl CatalogClient {
    /// Never fails: any upstream problem yields the single placeholder.
    pub async fn list_images(&self, product_id: &str) -> Vec<String> {
        self.list_images_outcome(product_id)
            .await
            .unwrap_or_else(|reason| {
                self.record_degraded(OP_LIST_IMAGES, &reason);
                ProductImageSet::placeholder(product_id)
            })
            .references()
    }

    pub async fn list_images_outcome(&self, product_id: &str) -> Fetched<ProductImageSet> {
        self.fetch_images(product_id).await.into()
    }

    async fn fetch_images(&self, product_id: &str) -> ApiResult<ProductImageSet> {
        let product_id = product_id.trim();
        if product_id.is_empty() {
            return Err(ApiError::InvalidRequest("product id is required".to_string()));
        }

        let token = self.get_token().await?;
        let url = self.endpoint(&["products", product_id, "images"])?;
        debug!("fetching images {}", url);

        self.metrics
            .upstream_requests
            .with_label_values(&[OP_LIST_IMAGES])
            .inc();
        let start = get_instant();
        let response = self
            .http()
            .get(url)
            .bearer_auth(token)
            .query(&[("includeContent", "true")])
            .send()
            .await;
        self.metrics
            .upstream_duration
            .with_label_values(&[OP_LIST_IMAGES])
            .observe(start.elapsed().as_secs_f64());

        let response = response?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UpstreamStatus(status));
        }

        let body = response.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        let serde_json::Value::Array(entries) = value else {
            return Err(ApiError::MalformedResponse(
                "image list is not a JSON array".to_string(),
            ));
        };
        let total = entries.len();
        let records = parse_records(entries);
        let set = ProductImageSet::resolve(product_id, &records);
        info!(
            "resolved {} of {} images for product {}",
            if set.is_placeholder() { 0 } else { set.images.len() },
            total,
            product_id
        );
        Ok(set)
    }
}

/// Entries that do not have the record shape are dropped one by one.
fn parse_records(entries: Vec<serde_json::Value>) -> Vec<ImageRecord> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            serde_json::from_value::<ImageRecord>(entry)
                .inspect_err(|e| debug!("dropping image record {}: {}", index, e))
                .ok()
        })
        .collect()
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUg==";

    fn record(content: Option<&str>, url: Option<&str>) -> ImageRecord {
        ImageRecord {
            image_content_base64: content.map(str::to_string),
            image_url: url.map(str::to_string),
        }
    }

    #[test]
    fn inline_content_wins_over_url() {
        let resolved = record(Some(PNG_B64), Some("https://blob.example.net/a.png")).resolve();
        assert_eq!(
            resolved.map(|r| r.to_reference()),
            Some(format!("data:image/png;base64,{}", PNG_B64))
        );
    }

    #[test]
    fn absolute_url_is_used_as_is() {
        let resolved = record(None, Some("https://blob.example.net/a.png")).resolve();
        assert_eq!(resolved, Some(ImageRef::Remote("https://blob.example.net/a.png".to_string())));

        let blank_content = record(Some("  "), Some("http://cdn.example.net/b.jpg")).resolve();
        assert_eq!(blank_content, Some(ImageRef::Remote("http://cdn.example.net/b.jpg".to_string())));
    }

    #[test]
    fn relative_url_and_invalid_base64_are_dropped() {
        assert_eq!(record(None, Some("/images/a.png")).resolve(), None);
        assert_eq!(record(Some("not base64!"), None).resolve(), None);
        assert_eq!(record(None, None).resolve(), None);
    }

    #[test]
    fn empty_set_becomes_placeholder() {
        let set = ProductImageSet::resolve("p1", &[record(None, None)]);
        assert!(set.is_placeholder());
        assert_eq!(set.references(), vec![PLACEHOLDER_IMAGE.to_string()]);
    }

    #[test]
    fn malformed_record_does_not_sink_its_neighbours() {
        let records = parse_records(vec![
            serde_json::json!({"id": "a", "imageUrl": "https://blob.example.net/a.png"}),
            serde_json::json!({"id": 7, "imageUrl": 42}),
            serde_json::json!("not an object"),
            serde_json::json!({"id": 8, "imageThumbnail": null, "imageUrl": "https://blob.example.net/c.png"}),
        ]);
        let set = ProductImageSet::resolve("p1", &records);
        assert_eq!(
            set.references(),
            vec![
                "https://blob.example.net/a.png".to_string(),
                "https://blob.example.net/c.png".to_string(),
            ]
        );
    }

    #[test]
    fn mime_is_sniffed() {
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(sniff_mime(b"GIF89a"), "image/gif");
        assert_eq!(sniff_mime(b"RIFF\0\0\0\0WEBPVP8 "), "image/webp");
        assert_eq!(sniff_mime(b"??"), "image/jpeg");
    }
}
