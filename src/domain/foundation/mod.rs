//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the frontier engine.

mod attribute;
mod cancellation;
mod errors;
mod ids;
mod slot;
mod timestamp;

pub use attribute::{canonical_bits, AttributeSchema, AttributeVector, MARIO_KART_8_ATTRIBUTES};
pub use cancellation::CancellationToken;
pub use errors::{EngineError, ErrorCode, ValidationError};
pub use ids::{CombinationId, RunId};
pub use slot::Slot;
pub use timestamp::Timestamp;
