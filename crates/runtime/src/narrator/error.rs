use thiserror::Error;

/// Reasons a narrator contribution was dropped.
///
/// None of these ever stop a battle; they are logged and the turn continues
/// with the deterministic behavior.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarratorError {
    #[error("narrator is not configured")]
    Unavailable,

    #[error("narrator transport returned nothing")]
    Transport,

    #[error("narrator response is not a JSON object")]
    MalformedResponse,

    #[error("unknown narrator event kind '{kind}'")]
    UnknownEventKind { kind: String },

    #[error("narrator event field '{field}' must be an integer")]
    InvalidDelta { field: &'static str },

    #[error("unknown narrator event target '{target}'")]
    UnknownTarget { target: String },

    #[error("narrator response has no usable action")]
    MissingAction,

    #[error("narrator chose '{action}', which is not in the allow-list")]
    ActionNotAllowed { action: String },
}
