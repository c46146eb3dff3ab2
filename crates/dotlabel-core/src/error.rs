pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTML-like label parse error: {message}")]
    MarkupParse { message: String },

    #[error("record label parse error at byte {offset}: {message}")]
    RecordParse { offset: usize, message: String },

    #[error("spline parse error in `{token}`: {message}")]
    SplineParse { token: String, message: String },

    #[error("invalid label config: {0}")]
    Config(#[from] serde_json::Error),
}
