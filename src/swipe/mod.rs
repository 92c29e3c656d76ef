pub mod deck;
pub mod gesture;
pub mod session;

pub use deck::{SwipeDeck, SwipeOutcome};
pub use gesture::{classify, Decision, GestureThresholds, Vector};
pub use session::SwipeSession;
