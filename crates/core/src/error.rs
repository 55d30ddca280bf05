use crate::ItemId;

/// Result alias that carries the custom [`MediaStageError`] type.
pub type Result<T> = std::result::Result<T, MediaStageError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum MediaStageError {
    /// The output handle refused to start playback for `item`. Non-fatal: the
    /// session is left idle and a later activation may retry.
    #[error("playback unavailable for `{item}`: {source}")]
    PlaybackUnavailable {
        item: ItemId,
        #[source]
        source: OutputError,
    },
    /// A page feature could not be wired because one of its surfaces is
    /// missing. Never shown to the user.
    #[error("{feature} disabled: {reason}")]
    OptionalFeatureUnavailable {
        feature: &'static str,
        reason: String,
    },
    #[error("unknown item `{0}`")]
    UnknownItem(ItemId),
    #[error("item `{0}` is already registered")]
    DuplicateItem(ItemId),
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl MediaStageError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn feature_unavailable(feature: &'static str, reason: impl Into<String>) -> Self {
        Self::OptionalFeatureUnavailable {
            feature,
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors that only disable part of the page.
    pub fn is_optional_feature(&self) -> bool {
        matches!(self, Self::OptionalFeatureUnavailable { .. })
    }
}

impl From<&str> for MediaStageError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for MediaStageError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

/// Reasons an output handle can reject a playback start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutputError {
    #[error("playback blocked by host policy")]
    NotAllowed,
    #[error("source `{0}` is unavailable")]
    SourceUnavailable(String),
    #[error("failed to decode source: {0}")]
    Decode(String),
    #[error("start was interrupted by a newer request")]
    Interrupted,
}
