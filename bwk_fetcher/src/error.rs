/// Error type for the whole crate.
#[derive(thiserror::Error, Debug)]
#[allow(missing_docs)]
pub enum Error {
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    JsonFrom(#[from] serde_json::Error),

    #[error(transparent)]
    StdIOError(#[from] std::io::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error("No looper prepared on the current thread")]
    NoLooper,

    #[error("A looper is already prepared on the current thread")]
    LooperAlreadyPrepared,

    #[error("The looper receiving the message has been dropped")]
    LooperGone,
}
