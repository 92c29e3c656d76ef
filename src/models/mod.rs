use serde::{Deserialize, Serialize};

/// Whether a listing can currently be rented
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Unavailable,
}

/// A rentable unit shown to a browsing user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: u32,
    pub title: String,
    pub location: String,
    pub rent: u32,
    pub deposit: u32,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub area_sqft: u32,
    pub availability: Availability,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
}

impl Listing {
    /// Amenities are a set; keep first occurrence order, drop repeats.
    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities.clear();
        for amenity in amenities {
            let amenity = amenity.into();
            if !self.amenities.contains(&amenity) {
                self.amenities.push(amenity);
            }
        }
        self
    }

    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }
}

/// One row of the public listings sheet, keyed by its fixed column labels.
///
/// Every field is raw cell text; a missing cell is an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SheetListing {
    pub user_type: String,
    pub gender: String,
    pub area: String,
    pub address: String,
    pub flat_type: String,
    pub rent_budget: String,
    pub deposit: String,
    pub availability: String,
    pub phone_number: String,
    pub date_posted: String,
    pub source: String,
    pub contact: String,
    pub pictures: String,
    pub post_content: String,
}

impl SheetListing {
    /// Convert a sheet row into a catalogue listing. `id` is the row's
    /// 1-based position in the fetched data.
    pub fn to_listing(&self, id: u32) -> Listing {
        let title = if self.flat_type.is_empty() {
            format!("Listing in {}", self.area)
        } else {
            format!("{} in {}", self.flat_type, self.area)
        };
        let location = match (self.address.is_empty(), self.area.is_empty()) {
            (false, false) => format!("{}, {}", self.address, self.area),
            (false, true) => self.address.clone(),
            _ => self.area.clone(),
        };

        Listing {
            id,
            title,
            location,
            rent: parse_amount(&self.rent_budget),
            deposit: parse_amount(&self.deposit),
            bedrooms: parse_leading_number(&self.flat_type),
            bathrooms: 0,
            area_sqft: 0,
            availability: parse_availability(&self.availability),
            amenities: Vec::new(),
            images: self
                .pictures
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Availability cell text. Any negating or taken word marks the listing
/// unavailable ("Not available", "Unavailable", "Occupied"); anything else,
/// including an empty cell, is available.
fn parse_availability(text: &str) -> Availability {
    let lowered = text.to_lowercase();
    let unavailable = lowered
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| {
            matches!(word, "not" | "no" | "occupied" | "rented" | "taken" | "booked")
                || word.starts_with("unavail")
        });
    if unavailable {
        Availability::Unavailable
    } else {
        Availability::Available
    }
}

/// First amount in a free-form money cell ("₹15,000 - 20,000" -> 15000).
///
/// A space is a digit-group separator only before exactly three digits; a
/// comma also before two (Indian grouping, "1,00,000"). Anything else ends
/// the amount. Saturates on overflow.
fn parse_amount(text: &str) -> u32 {
    let chars: Vec<char> = text.chars().collect();
    let Some(start) = chars.iter().position(|c| c.is_ascii_digit()) else {
        return 0;
    };

    let mut amount = 0u32;
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        if let Some(d) = c.to_digit(10) {
            amount = amount.saturating_mul(10).saturating_add(d);
        } else {
            let rest = &chars[i + 1..];
            let grouped = match c {
                ',' => is_digit_group(rest, 2) || is_digit_group(rest, 3),
                ' ' | '\u{a0}' => is_digit_group(rest, 3),
                _ => false,
            };
            if !grouped {
                break;
            }
        }
        i += 1;
    }
    amount
}

fn is_digit_group(rest: &[char], len: usize) -> bool {
    rest.len() >= len
        && rest[..len].iter().all(|c| c.is_ascii_digit())
        && !rest.get(len).is_some_and(|c| c.is_ascii_digit())
}

/// Leading number of a flat type ("2BHK" -> 2, "Studio" -> 0).
fn parse_leading_number(text: &str) -> u8 {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_row_conversion() {
        let row = SheetListing {
            area: "Koramangala".to_string(),
            address: "5th Block".to_string(),
            flat_type: "2BHK".to_string(),
            rent_budget: "₹18,500 / month".to_string(),
            deposit: "50000".to_string(),
            availability: "Not available".to_string(),
            pictures: "a.jpg, b.jpg".to_string(),
            ..Default::default()
        };

        let listing = row.to_listing(7);
        assert_eq!(listing.id, 7);
        assert_eq!(listing.title, "2BHK in Koramangala");
        assert_eq!(listing.location, "5th Block, Koramangala");
        assert_eq!(listing.rent, 18_500);
        assert_eq!(listing.deposit, 50_000);
        assert_eq!(listing.bedrooms, 2);
        assert_eq!(listing.availability, Availability::Unavailable);
        assert_eq!(listing.images, vec!["a.jpg", "b.jpg"]);

        let row = SheetListing {
            rent_budget: "₹15,000 - 20,000".to_string(),
            availability: "Unavailable".to_string(),
            ..Default::default()
        };
        let listing = row.to_listing(8);
        assert_eq!(listing.rent, 15_000);
        assert_eq!(listing.availability, Availability::Unavailable);
    }

    #[test]
    fn test_availability_words() {
        for cell in ["Unavailable", "UNAVAILABLE now", "Occupied", "Not available", "No"] {
            assert_eq!(parse_availability(cell), Availability::Unavailable, "{}", cell);
        }
        for cell in ["Available", "Available now", "From 1st June", ""] {
            assert_eq!(parse_availability(cell), Availability::Available, "{}", cell);
        }
    }

    #[test]
    fn test_amount_takes_first_number() {
        assert_eq!(parse_amount("₹15,000 - 20,000"), 15_000);
        assert_eq!(parse_amount("15000.50"), 15_000);
        assert_eq!(parse_amount("15 000 kr/mån"), 15_000);
        assert_eq!(parse_amount("20000 2BHK"), 20_000);
        assert_eq!(parse_amount("12000-14000"), 12_000);
        assert_eq!(parse_amount("1,00,000"), 100_000);
        assert_eq!(parse_amount("20000 25 sqm"), 20_000);
        assert_eq!(parse_amount("negotiable"), 0);
    }

    #[test]
    fn test_empty_sheet_row_defaults() {
        let listing = SheetListing::default().to_listing(1);
        assert_eq!(listing.rent, 0);
        assert_eq!(listing.bedrooms, 0);
        assert!(listing.is_available());
        assert!(listing.images.is_empty());
    }

    #[test]
    fn test_amenities_are_deduplicated() {
        let listing = SheetListing::default()
            .to_listing(1)
            .with_amenities(["Parking", "Gym", "Parking"]);
        assert_eq!(listing.amenities, vec!["Parking", "Gym"]);
    }

    #[test]
    fn test_listing_serializes_camel_case() {
        let listing = SheetListing::default().to_listing(3);
        let json = serde_json::to_value(&listing).unwrap();
        assert!(json.get("areaSqft").is_some());
        assert_eq!(json["availability"], "available");
    }
}
