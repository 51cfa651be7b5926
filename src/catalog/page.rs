use serde::{Deserialize, Deserializer, Serialize};

use crate::config::categories::Category;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
    pub ar: Option<String>,
    pub en: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    pub id: String,
    pub display_name: String,
    pub localized_description: LocalizedText,
    pub price_amount: f64,
    pub product_code: Option<String>,
    pub stock_quantity: Option<i64>,
    /// upstream accessory code, e.g. `850000000`
    pub accessory_category: Option<String>,
    /// site bucket the accessory code falls into
    pub category: Option<Category>,
}

/// Pagination envelope handed to the rendering layer.
///
/// Flags always follow `page_number` / `total_pages`, never the upstream's
/// own flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<ProductListing>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl Page {
    /// Degraded page: no items, zero counts, both flags false.
    pub fn empty(page_number: u32, page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page_number,
            page_size,
            total_count: 0,
            total_pages: 0,
            has_next_page: false,
            has_previous_page: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn from_upstream(upstream: UpstreamPage, requested_page: u32, requested_size: u32) -> Self {
        let page_number = upstream.page.filter(|p| *p > 0).unwrap_or(requested_page);
        let page_size = upstream.page_size.filter(|s| *s > 0).unwrap_or(requested_size);
        let items: Vec<ProductListing> = upstream.items.into_iter().map(ProductListing::from).collect();
        let total_count = upstream.total_count.unwrap_or(items.len() as u64);
        let total_pages = upstream
            .total_pages
            .unwrap_or_else(|| total_count.div_ceil(u64::from(page_size.max(1))));

        Self {
            items,
            page_number,
            page_size,
            total_count,
            total_pages,
            has_next_page: u64::from(page_number) < total_pages,
            has_previous_page: page_number > 1,
        }
    }
}

/// ================================
/// Upstream wire shapes
/// ================================
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpstreamPage {
    #[serde(default)]
    pub items: Vec<UpstreamProduct>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub total_count: Option<u64>,
    pub total_pages: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpstreamProduct {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    #[serde(default)]
    pub list_price: Option<f64>,
    #[serde(alias = "productCode")]
    pub product_number: Option<String>,
    pub stock_quantity: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_code")]
    pub accessory_type: Option<String>,
}

impl From<UpstreamProduct> for ProductListing {
    fn from(product: UpstreamProduct) -> Self {
        let category = product.accessory_type.as_deref().and_then(Category::from_code);
        Self {
            id: product.id,
            display_name: product.name,
            localized_description: LocalizedText {
                ar: product.description_ar,
                en: product.description_en,
            },
            price_amount: product.list_price.unwrap_or_default(),
            product_code: product.product_number,
            stock_quantity: product.stock_quantity,
            accessory_category: product.accessory_type,
            category,
        }
    }
}

/// Accessory codes arrive either as numbers or as numeric strings.
fn deserialize_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Number(u64),
        Text(String),
    }

    Ok(Option::<Code>::deserialize(deserializer)?.map(|code| match code {
        Code::Number(n) => n.to_string(),
        Code::Text(s) => s,
    }))
}
