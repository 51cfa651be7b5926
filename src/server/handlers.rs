use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::header::CACHE_CONTROL;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::categories::{Category, CategoryDescriptor, CATEGORIES};
use crate::contact::form::ContactForm;
use crate::contact::ContactError;
use crate::server::server::{AppState, PagingConfig};
use crate::utils::constants::{IMAGES_CACHE_CONTROL, PRODUCTS_CACHE_CONTROL};

/// Raw query of `GET /api/products`; parsed leniently, bad values fall back to defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingRequest {
    pub page: u32,
    pub page_size: u32,
    pub category: Option<Category>,
}

impl ProductsQuery {
    pub fn normalize(&self, paging: &PagingConfig) -> ListingRequest {
        let page = parse_number(self.page.as_deref()).unwrap_or(1).max(1);
        let page_size = parse_number(self.page_size.as_deref())
            .unwrap_or(paging.default_page_size)
            .clamp(1, paging.max_page_size.max(1));
        let category = self
            .category
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .and_then(|key| {
                key.parse::<Category>()
                    .inspect_err(|e| debug!("{}, listing without filter", e))
                    .ok()
            });
        ListingRequest {
            page,
            page_size,
            category,
        }
    }
}

fn parse_number(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.trim().parse::<u32>().ok())
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> impl IntoResponse {
    let request = query.normalize(&state.paging);
    let page = state
        .catalog
        .list_products(request.page, request.page_size, request.category)
        .await;
    ([(CACHE_CONTROL, PRODUCTS_CACHE_CONTROL)], Json(page))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImagesResponse {
    pub images: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn list_product_images(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Response {
    if product_id.trim().is_empty() {
        return missing_product_id().await;
    }
    let images = state.catalog.list_images(&product_id).await;
    ([(CACHE_CONTROL, IMAGES_CACHE_CONTROL)], Json(ImagesResponse { images })).into_response()
}

/// `/api/product-images` without an id.
pub async fn missing_product_id() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Product ID is required".to_string(),
        }),
    )
        .into_response()
}

pub async fn list_categories() -> Json<&'static [CategoryDescriptor]> {
    Json(&CATEGORIES[..])
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> impl IntoResponse {
    let result = match payload {
        Ok(Json(form)) => state.contact.submit(&form).await,
        Err(rejection) => {
            warn!("unreadable contact body: {}", rejection);
            Err(ContactError::UnreadableBody(rejection.body_text()))
        }
    };

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(ContactResponse {
                ok: true,
                error: None,
            }),
        ),
        Err(err) => {
            debug!("contact submission refused: {}", err);
            (
                err.status(),
                Json(ContactResponse {
                    ok: false,
                    error: Some(err.code().to_string()),
                }),
            )
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn query(page: Option<&str>, page_size: Option<&str>, category: Option<&str>) -> ProductsQuery {
        ProductsQuery {
            page: page.map(str::to_string),
            page_size: page_size.map(str::to_string),
            category: category.map(str::to_string),
        }
    }

    const PAGING: PagingConfig = PagingConfig {
        default_page_size: 12,
        max_page_size: 48,
    };

    #[test]
    fn defaults_apply_when_values_are_missing_or_invalid() {
        let request = query(None, Some("many"), None).normalize(&PAGING);
        assert_eq!(
            request,
            ListingRequest {
                page: 1,
                page_size: 12,
                category: None
            }
        );
    }

    #[test]
    fn bounds_are_enforced_at_the_boundary() {
        let request = query(Some("0"), Some("500"), Some("necklaces")).normalize(&PAGING);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 48);
        assert_eq!(request.category, Some(Category::Necklaces));

        assert_eq!(query(None, Some("0"), None).normalize(&PAGING).page_size, 1);
    }

    #[test]
    fn unknown_category_lists_everything() {
        assert_eq!(query(None, None, Some("others")).normalize(&PAGING).category, None);
    }
}
