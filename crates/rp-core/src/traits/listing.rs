//! Client listing trait

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{ClientsPage, Filters, Pagination};

/// Paginated, filterable query over the server's clients
#[async_trait]
pub trait ListingClient: Send + Sync {
    /// Fetch one page of clients matching the filters
    async fn list_clients(
        &self,
        pagination: Pagination,
        filters: Filters,
    ) -> Result<ClientsPage, ApiError>;
}

#[async_trait]
impl<T: ListingClient + ?Sized> ListingClient for &T {
    async fn list_clients(
        &self,
        pagination: Pagination,
        filters: Filters,
    ) -> Result<ClientsPage, ApiError> {
        (**self).list_clients(pagination, filters).await
    }
}
