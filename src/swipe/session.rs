use crate::error::StorageResult;
use crate::interest::InterestStore;
use crate::models::Listing;
use crate::swipe::deck::{SwipeDeck, SwipeOutcome};
use crate::swipe::gesture::{Decision, GestureThresholds, Vector};
use tracing::info;

/// One user's browsing session: the deck, their saved listings and the
/// gesture thresholds used to read their swipes.
pub struct SwipeSession {
    deck: SwipeDeck,
    interests: InterestStore,
    thresholds: GestureThresholds,
}

impl SwipeSession {
    pub fn new(deck: SwipeDeck, interests: InterestStore, thresholds: GestureThresholds) -> Self {
        Self {
            deck,
            interests,
            thresholds,
        }
    }

    /// Handle a pointer release on the active card.
    pub fn handle_release(
        &mut self,
        offset: Vector,
        velocity: Vector,
    ) -> StorageResult<SwipeOutcome> {
        match self.thresholds.classify(offset, velocity) {
            Some(decision) => self.handle_decision(decision),
            None => Ok(SwipeOutcome::Ignored),
        }
    }

    /// Handle a button press or a classified swipe.
    pub fn handle_decision(&mut self, decision: Decision) -> StorageResult<SwipeOutcome> {
        let outcome = self.deck.apply(decision, &mut self.interests)?;
        if let SwipeOutcome::Decided {
            listing_id,
            saved: Some(saved),
            ..
        } = &outcome
        {
            info!("Listing {} save: {:?}", listing_id, saved);
        }
        Ok(outcome)
    }

    /// Explicitly drop a listing from the saved set.
    pub fn remove_saved(&mut self, id: u32) -> StorageResult<bool> {
        self.interests.remove(id)
    }

    pub fn active(&self) -> Option<&Listing> {
        self.deck.peek_active()
    }

    pub fn deck(&self) -> &SwipeDeck {
        &self.deck
    }

    pub fn interests(&self) -> &InterestStore {
        &self.interests
    }

    pub fn restart(&mut self) {
        self.deck.reset();
    }
}
