use crate::error::{DeckError, StorageResult};
use crate::interest::{AddOutcome, InterestStore};
use crate::models::Listing;
use crate::swipe::gesture::Decision;
use std::collections::HashSet;
use tracing::debug;

/// What a decision did to the deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// The active listing was consumed
    Decided {
        listing_id: u32,
        decision: Decision,
        saved: Option<AddOutcome>,
    },
    /// The last decided listing is active again
    Restored { listing_id: u32 },
    /// Nothing to act on
    Ignored,
}

/// Stack of pending listings plus the log of decided ones.
///
/// The last element of the queue is the active card. Every catalogue
/// listing is in exactly one of the queue or the history.
#[derive(Debug, Clone)]
pub struct SwipeDeck {
    catalogue: Vec<Listing>,
    queue: Vec<Listing>,
    history: Vec<u32>,
}

impl SwipeDeck {
    pub fn new(catalogue: Vec<Listing>) -> Result<Self, DeckError> {
        let mut seen = HashSet::with_capacity(catalogue.len());
        for listing in &catalogue {
            if listing.id == 0 {
                return Err(DeckError::ZeroId);
            }
            if !seen.insert(listing.id) {
                return Err(DeckError::DuplicateListing(listing.id));
            }
        }

        Ok(Self {
            queue: catalogue.clone(),
            catalogue,
            history: Vec::new(),
        })
    }

    /// Apply a decision, dispatching undo to [`SwipeDeck::undo`].
    pub fn apply(
        &mut self,
        decision: Decision,
        interests: &mut InterestStore,
    ) -> StorageResult<SwipeOutcome> {
        match decision {
            Decision::Undo => Ok(self.undo()),
            _ => self.resolve(decision, interests),
        }
    }

    /// Consume the active listing. A save is stored before the card is
    /// popped, so a storage failure leaves the deck untouched.
    pub fn resolve(
        &mut self,
        decision: Decision,
        interests: &mut InterestStore,
    ) -> StorageResult<SwipeOutcome> {
        if decision == Decision::Undo {
            return Ok(self.undo());
        }

        let Some(active) = self.queue.last() else {
            debug!("Ignoring {:?} on empty queue", decision);
            return Ok(SwipeOutcome::Ignored);
        };

        let saved = match decision {
            Decision::Save => Some(interests.add(active.clone())?),
            _ => None,
        };

        let listing_id = active.id;
        self.queue.pop();
        self.history.push(listing_id);
        debug!("Listing {} decided as {:?}", listing_id, decision);

        Ok(SwipeOutcome::Decided {
            listing_id,
            decision,
            saved,
        })
    }

    /// Return the most recently decided listing to the top of the queue.
    /// Saved listings stay saved.
    pub fn undo(&mut self) -> SwipeOutcome {
        let Some(listing_id) = self.history.pop() else {
            debug!("Nothing to undo");
            return SwipeOutcome::Ignored;
        };

        // History only ever holds catalogue ids
        if let Some(listing) = self.catalogue.iter().find(|l| l.id == listing_id) {
            self.queue.push(listing.clone());
        }
        debug!("Listing {} restored", listing_id);

        SwipeOutcome::Restored { listing_id }
    }

    pub fn peek_active(&self) -> Option<&Listing> {
        self.queue.last()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Pending listings, bottom first
    pub fn queue(&self) -> &[Listing] {
        &self.queue
    }

    /// Decided listing ids, oldest first
    pub fn history(&self) -> &[u32] {
        &self.history
    }

    pub fn catalogue(&self) -> &[Listing] {
        &self.catalogue
    }

    /// Start over with the full catalogue and an empty history.
    pub fn reset(&mut self) {
        self.queue = self.catalogue.clone();
        self.history.clear();
    }
}
