use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("malformed grid: expected {expected} slots, got {actual}")]
    MalformedGrid { expected: usize, actual: usize },

    #[error("slot {index} out of range for a grid of {len} slots")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("reservation template missing: {0}")]
    TemplateMissing(String),

    #[error("reservation template is not a JSON object")]
    TemplateNotObject,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("booking platform rejected the request (code {code}): {message}")]
    Api { code: i64, message: String },

    #[error("day offset {offset} not present, platform returned {available} days")]
    MissingDay { offset: usize, available: usize },

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type BookingResult<T> = Result<T, BookingError>;
