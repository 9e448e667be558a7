use btsg_messages::MessageError;
use btsg_types::TypesError;
use btsg_utils::UtilsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    Input(#[from] TypesError),

    #[error("message error: {0}")]
    Message(#[from] MessageError),

    #[error(transparent)]
    Io(#[from] UtilsError),

    #[error("{mismatched} of {total} validators did not reach their target")]
    Mismatch { mismatched: usize, total: usize },
}
