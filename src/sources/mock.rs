use crate::models::{Availability, Listing};
use tracing::info;

fn listing(
    id: u32,
    title: &str,
    location: &str,
    rent: u32,
    bedrooms: u8,
    area_sqft: u32,
    amenities: &[&str],
) -> Listing {
    Listing {
        id,
        title: title.to_string(),
        location: location.to_string(),
        rent,
        deposit: rent * 3,
        bedrooms,
        bathrooms: 1,
        area_sqft,
        availability: Availability::Available,
        amenities: Vec::new(),
        images: vec![format!("https://picsum.photos/seed/listing{}/800/600", id)],
    }
    .with_amenities(amenities.iter().copied())
}

/// Built-in catalogue used when no sheet source is configured
pub fn mock_catalogue() -> Vec<Listing> {
    info!("📋 Using built-in mock catalogue");

    let mut catalogue = vec![
        listing(
            1,
            "Bright two-room flat",
            "Götgatan 120, Södermalm",
            14_500,
            2,
            750,
            &["Elevator", "Balcony"],
        ),
        listing(
            2,
            "Family apartment near Ringvägen",
            "Ringvägen 11A, Södermalm",
            21_000,
            4,
            900,
            &["Elevator", "Balcony"],
        ),
        listing(3, "Compact studio", "Tjustgatan 4, Katarina", 9_800, 1, 260, &["Elevator"]),
        listing(
            4,
            "Top-floor flat with fireplace",
            "Torkel Knutssonsgatan 31, Maria",
            26_000,
            4,
            1_230,
            &["Elevator", "Balcony", "Fireplace"],
        ),
        listing(
            5,
            "Two rooms by Folkungagatan",
            "Folkungagatan 101, Södermalm",
            12_900,
            2,
            420,
            &["Elevator"],
        ),
        listing(
            6,
            "Garden-level one bedroom",
            "Bondegatan 54, Södermalm",
            11_200,
            1,
            480,
            &["Garden", "Storage"],
        ),
    ];
    catalogue[5].availability = Availability::Unavailable;
    catalogue[3].bathrooms = 2;
    catalogue
}
