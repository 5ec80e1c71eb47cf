//! User endpoints (read-only)

use crate::models::{UserFilters, UserPage};

use super::{ApiClient, ApiError};

pub async fn list(
    client: &ApiClient,
    filters: &UserFilters,
    page: u32,
) -> Result<UserPage, ApiError> {
    client.get("/users/all", &filters.query_pairs(page)).await
}
