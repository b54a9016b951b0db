use thiserror::Error;

/// Errors raised while parsing a JID from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JidError {
    #[error("jid is empty")]
    Empty,
    #[error("jid has an empty domain part")]
    EmptyDomain,
    #[error("jid has an empty local part before '@'")]
    EmptyLocalpart,
    #[error("jid has an empty resource part after '/'")]
    EmptyResource,
}

/// Fatal errors in the incoming event stream.
///
/// These indicate the stream itself is broken, not that a payload was
/// unrecognized. Unknown payloads are skipped without error; a structural
/// error poisons the parser until it is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamParseError {
    #[error("end element without a matching start element")]
    UnmatchedEnd,
    #[error("stream failed earlier with a structural error")]
    Poisoned,
}
