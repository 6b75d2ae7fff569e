use thiserror::Error;

/// Primitive-level failures raised while reading replay bytes.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Truncated input at position {position}: needed {requested} bytes, {remaining} remaining")]
    TruncatedInput {
        position: usize,
        requested: usize,
        remaining: usize,
    },

    #[error("Malformed ULEB128 varint starting at position {position}")]
    MalformedVarint { position: usize },

    #[error("Invalid UTF-8 string at position {position}: {source}")]
    InvalidEncoding {
        position: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Unsupported integer width: {0} bytes")]
    UnsupportedWidth(usize),

    #[error("Action payload decompression failed: {0}")]
    Decompression(#[source] std::io::Error),

    #[error("Decompressed action payload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Decoded value does not match the field layout")]
    SchemaMismatch,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid replay file (field `{field}`): {source}")]
    InvalidReplayFile {
        field: &'static str,
        #[source]
        source: DecodeError,
    },

    #[error("Unsupported game mode: {0} (only mania is supported)")]
    UnsupportedGameMode(u8),

    #[error("Reserved mod bit set in mask {mask:#010x}")]
    ReservedModBit { mask: u32 },

    #[error("Division by zero while computing {metric}")]
    DivisionByZero { metric: &'static str },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Performance calculation failed: {0}")]
    Calculator(String),

    #[error("Beatmap archive error: {0}")]
    Archive(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the primitive cause when this is a structural decode failure.
    pub fn decode_cause(&self) -> Option<&DecodeError> {
        match self {
            Self::InvalidReplayFile { source, .. } => Some(source),
            _ => None,
        }
    }

    /// True for failures coming from collaborators rather than the decoder.
    pub fn is_collaborator(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::Network(_)
                | Self::Calculator(_)
                | Self::Archive(_)
                | Self::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
