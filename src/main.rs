use anyhow::{Context, Result};
use rental_scout::flows::{ask_assistant, AssistantInput, GeminiBackend};
use rental_scout::interest::{FileStorage, InterestStore};
use rental_scout::sources::{mock_catalogue, GoogleSheetsSource, SheetCache, SystemClock};
use rental_scout::swipe::{Decision, SwipeDeck, SwipeOutcome, SwipeSession, Vector};
use rental_scout::{Config, Listing};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🏠 Rental Scout");

    let config = Config::from_env().context("Failed to read configuration")?;
    let catalogue = load_catalogue(&config).await?;

    let storage = FileStorage::open(&config.data_dir)
        .with_context(|| format!("Failed to open data dir {}", config.data_dir.display()))?;
    let interests = InterestStore::load(Arc::new(storage));
    let deck = SwipeDeck::new(catalogue).context("Catalogue has invalid listing ids")?;
    let mut session = SwipeSession::new(deck, interests, config.thresholds);

    let assistant = match &config.gemini {
        Some(settings) => Some(GeminiBackend::new(settings.clone())?),
        None => None,
    };

    println!(
        "Commands: swipe <dx> <dy> <vx> <vy> | pass | interest | save | undo | saved | \
         remove <id> | restart | ask <question> | quit"
    );
    show_active(session.active());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        let result = match command {
            "swipe" => {
                let Some((offset, velocity)) = parse_swipe(words) else {
                    println!("usage: swipe <dx> <dy> <vx> <vy>");
                    continue;
                };
                session.handle_release(offset, velocity)
            }
            "pass" => session.handle_decision(Decision::Pass),
            "interest" => session.handle_decision(Decision::Interest),
            "save" => session.handle_decision(Decision::Save),
            "undo" => session.handle_decision(Decision::Undo),
            "saved" => {
                for listing in session.interests().list() {
                    println!("  ♥ {}. {} ({} / month)", listing.id, listing.title, listing.rent);
                }
                continue;
            }
            "remove" => {
                match words.next().and_then(|w| w.parse::<u32>().ok()) {
                    Some(id) => match session.remove_saved(id) {
                        Ok(true) => println!("Removed {} from saved listings", id),
                        Ok(false) => println!("Listing {} was not saved", id),
                        Err(e) => println!("⚠️  Could not update saved listings: {}", e),
                    },
                    None => println!("usage: remove <id>"),
                }
                continue;
            }
            "restart" => {
                session.restart();
                show_active(session.active());
                continue;
            }
            "ask" => {
                let query = words.collect::<Vec<_>>().join(" ");
                match &assistant {
                    Some(backend) => match ask_assistant(backend, &AssistantInput { query }).await {
                        Ok(reply) => println!("🤖 {}", reply.response),
                        Err(e) => println!("⚠️  Assistant unavailable: {}", e),
                    },
                    None => println!("Set GEMINI_API_KEY to use the assistant"),
                }
                continue;
            }
            "quit" | "exit" => break,
            other => {
                println!("Unknown command: {}", other);
                continue;
            }
        };

        match result {
            Ok(SwipeOutcome::Ignored) => println!("(no change)"),
            Ok(outcome) => info!("{:?}", outcome),
            Err(e) => println!("⚠️  Could not save listing: {}", e),
        }
        show_active(session.active());
    }

    info!("💾 {} saved listings", session.interests().len());
    Ok(())
}

async fn load_catalogue(config: &Config) -> Result<Vec<Listing>> {
    let Some(query) = &config.sheet else {
        return Ok(mock_catalogue());
    };

    let source = GoogleSheetsSource::new(query.clone())?;
    let cache = SheetCache::new(
        Arc::new(SystemClock),
        chrono::Duration::seconds(config.cache_ttl_secs),
    );

    match cache.load_catalogue(&source).await {
        Ok(listings) if !listings.is_empty() => Ok(listings),
        Ok(_) => {
            warn!("Sheet is empty - using mock catalogue");
            Ok(mock_catalogue())
        }
        Err(e) => {
            warn!("Could not load sheet ({}) - using mock catalogue", e);
            Ok(mock_catalogue())
        }
    }
}

/// Exactly four numbers: offset x/y then velocity x/y.
fn parse_swipe<'a>(words: impl Iterator<Item = &'a str>) -> Option<(Vector, Vector)> {
    let numbers = words
        .map(|w| w.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    match numbers.as_slice() {
        [dx, dy, vx, vy] => Some((Vector::new(*dx, *dy), Vector::new(*vx, *vy))),
        _ => None,
    }
}

fn show_active(active: Option<&Listing>) {
    match active {
        Some(listing) => {
            println!();
            println!("{}. {} ({} / month)", listing.id, listing.title, listing.rent);
            println!("   {}", listing.location);
            println!(
                "   {} bed, {} bath, {} sqft, deposit {}",
                listing.bedrooms, listing.bathrooms, listing.area_sqft, listing.deposit
            );
            if !listing.amenities.is_empty() {
                println!("   Amenities: {}", listing.amenities.join(", "));
            }
            if !listing.is_available() {
                println!("   (currently unavailable)");
            }
        }
        None => println!("No more listings. Use `undo` or `restart`."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_swipe_reads_four_numbers() {
        let (offset, velocity) = parse_swipe("10 -5.5 0.2 3".split_whitespace()).unwrap();
        assert_eq!(offset, Vector::new(10.0, -5.5));
        assert_eq!(velocity, Vector::new(0.2, 3.0));
    }

    #[test]
    fn test_parse_swipe_rejects_bad_tokens() {
        assert!(parse_swipe("10 x 5 6 7".split_whitespace()).is_none());
        assert!(parse_swipe("10 5 6".split_whitespace()).is_none());
        assert!(parse_swipe("1 2 3 4 5".split_whitespace()).is_none());
    }
}
