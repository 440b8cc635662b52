use std::fmt;

use crate::Error;

/// Identifier of a user facing message reporting a failed fetch.
///
/// Turning it into localized text is up to the caller, [`MessageId::format`] gives an English
/// rendering suitable for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    /// The explorer answered with a non-2xx status. Arguments: status code, status text.
    ErrorHttp,

    /// The request failed or the response could not be parsed. Arguments: error message.
    ErrorIo,
}

impl MessageId {
    fn template(&self) -> &'static str {
        match self {
            MessageId::ErrorHttp => "Server error {0}: {1}",
            MessageId::ErrorIo => "Network problem: {0}",
        }
    }

    /// Replace the `{i}` placeholders of the message with the given arguments
    pub fn format(&self, args: &[MessageArg]) -> String {
        let mut message = self.template().to_string();
        for (i, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{i}}}"), &arg.to_string());
        }
        message
    }
}

/// An argument of a [`MessageId`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageArg {
    Int(i64),
    Str(String),
}

impl fmt::Display for MessageArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageArg::Int(i) => write!(f, "{i}"),
            MessageArg::Str(s) => write!(f, "{s}"),
        }
    }
}

/// The two kinds of failure reported to a [`crate::ResultCallback`].
///
/// Connection problems, malformed JSON and missing fields are all [`FetchFailure::Io`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    Http { status: u16, message: String },
    Io(String),
}

impl FetchFailure {
    pub fn message_id(&self) -> MessageId {
        match self {
            FetchFailure::Http { .. } => MessageId::ErrorHttp,
            FetchFailure::Io(_) => MessageId::ErrorIo,
        }
    }

    pub fn args(&self) -> Vec<MessageArg> {
        match self {
            FetchFailure::Http { status, message } => vec![
                MessageArg::Int(*status as i64),
                MessageArg::Str(message.clone()),
            ],
            FetchFailure::Io(message) => vec![MessageArg::Str(message.clone())],
        }
    }
}

impl From<&Error> for FetchFailure {
    fn from(err: &Error) -> Self {
        match err {
            Error::Http { status, message } => FetchFailure::Http {
                status: *status,
                message: message.clone(),
            },
            e => FetchFailure::Io(e.to_string()),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message_id().format(&self.args()))
    }
}
