use crate::error::{SourceError, SourceResult};
use crate::models::SheetListing;
use crate::sources::traits::ListingSource;
use crate::sources::types::SheetQuery;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Reads listings from a public Google Sheet through the Sheets v4 REST API
pub struct GoogleSheetsSource {
    client: Client,
    query: SheetQuery,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetResponse {
    #[serde(default)]
    value_ranges: Vec<ValueRange>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl GoogleSheetsSource {
    pub fn new(query: SheetQuery) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, query })
    }

    fn batch_url(&self) -> String {
        format!("{}/{}/values:batchGet", SHEETS_API, self.query.sheet_id)
    }
}

#[async_trait]
impl ListingSource for GoogleSheetsSource {
    async fn fetch_page(&self, page: usize) -> SourceResult<Vec<SheetListing>> {
        let header_range = self.query.header_range();
        let page_range = self.query.page_range(page);
        debug!("Fetching sheet ranges {} and {}", header_range, page_range);

        let mut params = vec![("ranges", header_range), ("ranges", page_range)];
        if let Some(key) = &self.query.api_key {
            params.push(("key", key.clone()));
        }

        let response = self.client.get(self.batch_url()).query(&params).send().await?;

        if !response.status().is_success() {
            warn!("Sheets API returned status: {}", response.status());
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let rows = parse_batch_response(&body)?;
        info!("Fetched {} rows from sheet page {}", rows.len(), page);
        Ok(rows)
    }

    fn page_size(&self) -> usize {
        self.query.page_size
    }

    fn source_name(&self) -> &'static str {
        "Google Sheets"
    }
}

/// Parse a `values:batchGet` body holding the header range then the data range.
pub fn parse_batch_response(body: &str) -> SourceResult<Vec<SheetListing>> {
    let parsed: BatchGetResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))?;

    let mut ranges = parsed.value_ranges.into_iter();
    let header = ranges
        .next()
        .and_then(|range| range.values.into_iter().next())
        .ok_or_else(|| SourceError::Malformed("missing header row".to_string()))?;
    let rows = ranges.next().map(|range| range.values).unwrap_or_default();

    Ok(map_rows(&header, &rows))
}

/// Map raw rows onto listing fields by header label. Unknown columns are
/// ignored; short rows leave the remaining fields empty.
pub fn map_rows(header: &[String], rows: &[Vec<String>]) -> Vec<SheetListing> {
    rows.iter()
        .map(|row| {
            let mut listing = SheetListing::default();
            for (label, cell) in header.iter().zip(row.iter()) {
                if let Some(field) = field_for(&mut listing, label.trim()) {
                    *field = cell.trim().to_string();
                }
            }
            listing
        })
        .collect()
}

fn field_for<'a>(listing: &'a mut SheetListing, label: &str) -> Option<&'a mut String> {
    let field = match label {
        "User Type" => &mut listing.user_type,
        "Gender" => &mut listing.gender,
        "Area" => &mut listing.area,
        "Address" => &mut listing.address,
        "Flat Type" => &mut listing.flat_type,
        "Rent/ Budget" => &mut listing.rent_budget,
        "Deposit" => &mut listing.deposit,
        "Availability" => &mut listing.availability,
        "Phone Number" => &mut listing.phone_number,
        "Date Posted" => &mut listing.date_posted,
        "Source" => &mut listing.source,
        "Email/ Messenger" => &mut listing.contact,
        "Pictures" => &mut listing.pictures,
        "Post Content" => &mut listing.post_content,
        _ => return None,
    };
    Some(field)
}
