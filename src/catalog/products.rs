use tracing::{debug, info};

use crate::catalog::client::{CatalogClient, OP_LIST_PRODUCTS};
use crate::catalog::outcome::Fetched;
use crate::catalog::page::{Page, UpstreamPage};
use crate::config::categories::Category;
use crate::error::{ApiError, ApiResult};
use crate::helpers::time::get_instant;

impl CatalogClient {
    /// `page` and `page_size` are forwarded as given; bounds are the caller's job.
    ///
    /// Never fails: any upstream problem yields `Page::empty`.
    pub async fn list_products(&self, page: u32, page_size: u32, category: Option<Category>) -> Page {
        self.list_products_outcome(page, page_size, category)
            .await
            .unwrap_or_else(|reason| {
                self.record_degraded(OP_LIST_PRODUCTS, &reason);
                Page::empty(page, page_size)
            })
    }

    pub async fn list_products_outcome(
        &self,
        page: u32,
        page_size: u32,
        category: Option<Category>,
    ) -> Fetched<Page> {
        self.fetch_products(page, page_size, category).await.into()
    }

    async fn fetch_products(&self, page: u32, page_size: u32, category: Option<Category>) -> ApiResult<Page> {
        let token = self.get_token().await?;
        let url = self.endpoint(&["products"])?;

        let mut query = vec![("page", page.to_string()), ("pageSize", page_size.to_string())];
        if let Some(category) = category {
            query.push(("accessoryType", category.query_value()));
        }
        debug!("fetching products {} {:?}", url, query);

        self.metrics
            .upstream_requests
            .with_label_values(&[OP_LIST_PRODUCTS])
            .inc();
        let start = get_instant();
        let response = self
            .http()
            .get(url)
            .bearer_auth(token)
            .query(&query)
            .send()
            .await;
        self.metrics
            .upstream_duration
            .with_label_values(&[OP_LIST_PRODUCTS])
            .observe(start.elapsed().as_secs_f64());

        let response = response?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UpstreamStatus(status));
        }

        let body = response.text().await?;
        let upstream: UpstreamPage = serde_json::from_str(&body)?;
        let page = Page::from_upstream(upstream, page, page_size);
        info!(
            "fetched {} products, page {}/{}",
            page.items.len(),
            page.page_number,
            page.total_pages
        );
        Ok(page)
    }
}
