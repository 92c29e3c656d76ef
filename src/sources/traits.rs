use crate::error::SourceResult;
use crate::models::SheetListing;
use async_trait::async_trait;

/// Common trait for paginated listing sources
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch one page of rows. Page numbers start at 0; a page shorter
    /// than `page_size` is the last one.
    async fn fetch_page(&self, page: usize) -> SourceResult<Vec<SheetListing>>;

    /// Rows per page
    fn page_size(&self) -> usize;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}
