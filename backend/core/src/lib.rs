pub mod error;
pub mod message;
pub mod traits;
pub mod types;

pub use error::{ConsultError, ErrorKind};
pub use message::{ChatMessage, Role};
pub use traits::{ApiKey, CompletionProvider, CompletionRequest, CompletionResponse};
pub use types::{Consultation, ConsultationRequest, ConsultationResult, FeedbackRating};
