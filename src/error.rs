//! Error types for the card
use thiserror::Error;

/// Card setup errors
///
/// None of these are retried: a missing element is a page authoring mistake.
#[derive(Error, Debug)]
pub enum CardError {
    /// A required DOM element is absent
    #[error("missing element: {0}")]
    MissingElement(&'static str),

    /// The confetti element exists but is not a <canvas>
    #[error("element #{0} is not a canvas")]
    NotACanvas(&'static str),

    /// The canvas refused to hand out a 2D context
    #[error("2D canvas context unavailable")]
    NoContext2d,

    /// Card configuration JSON could not be parsed
    #[error("invalid card config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
