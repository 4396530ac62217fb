pub mod aggregate;
pub mod answers;
pub mod dates;
pub mod errors;
pub mod source;
pub mod stats;

// Re-exports
pub use aggregate::Aggregator;
pub use answers::{AnswerItem, AnswersPage, PageRequest, QueryWindow};
pub use errors::{DateError, StatsError, TransportError, TransportErrorKind};
pub use source::AnswerSource;
pub use stats::{StatsReport, TopAnswer, TopAnswers};
