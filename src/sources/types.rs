use serde::{Deserialize, Serialize};

/// Where and how to read the public listings sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetQuery {
    /// Spreadsheet id from the sheet URL
    pub sheet_id: String,
    /// API key for the Sheets REST API
    pub api_key: Option<String>,
    /// Tab holding the listings
    pub tab: String,
    /// Data rows per page
    pub page_size: usize,
}

impl Default for SheetQuery {
    fn default() -> Self {
        Self {
            sheet_id: String::new(),
            api_key: None,
            tab: "Sheet1".to_string(),
            page_size: 50,
        }
    }
}

impl SheetQuery {
    /// A1 range of the header row
    pub fn header_range(&self) -> String {
        format!("{}!A1:N1", self.tab)
    }

    /// A1 range of the data rows on `page`. Row 1 is the header.
    pub fn page_range(&self, page: usize) -> String {
        let first = 2 + page * self.page_size;
        let last = first + self.page_size - 1;
        format!("{}!A{}:N{}", self.tab, first, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ranges_skip_header() {
        let query = SheetQuery {
            page_size: 10,
            ..Default::default()
        };
        assert_eq!(query.header_range(), "Sheet1!A1:N1");
        assert_eq!(query.page_range(0), "Sheet1!A2:N11");
        assert_eq!(query.page_range(2), "Sheet1!A22:N31");
    }
}
