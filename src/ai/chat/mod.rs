mod assistant;
mod context;
mod fallback;
mod models;
mod store;

pub use assistant::{Assistant, Clock, RetryPolicy};
pub use fallback::fallback_reply;
pub use models::{CONTEXT_MARKER, Transcript, Turn, TurnRole, strip_context};
pub use store::{ConversationStore, SharedTranscript};
