pub mod cache;
pub mod mock;
pub mod sheets;
pub mod traits;
pub mod types;

pub use cache::{Clock, SheetCache, SystemClock};
pub use mock::mock_catalogue;
pub use sheets::GoogleSheetsSource;
pub use traits::ListingSource;
pub use types::SheetQuery;
