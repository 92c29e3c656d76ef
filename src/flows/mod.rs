pub mod assistant;
pub mod backend;
pub mod gemini;
pub mod rent;
pub mod speech;
pub mod summary;

pub use assistant::{ask_assistant, AssistantInput, AssistantReply};
pub use backend::{GenerationBackend, SpeechAudio};
pub use gemini::{GeminiBackend, GeminiSettings};
pub use rent::{suggest_rent, RentSuggestion, RentSuggestionInput};
pub use speech::{text_to_speech, SpeechInput, SpeechOutput};
pub use summary::{summarize, Summary, SummaryInput};
