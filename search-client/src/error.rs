use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchClientError {
    #[error("InvalidEndpoint: {0}")]
    InvalidEndpoint(String),
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("UnexpectedStatus: {status} {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("ParsingError: {0}")]
    ParsingError(String),
}
