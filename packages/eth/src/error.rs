use alloy::{
    providers::PendingTransactionError,
    transports::{RpcError, TransportErrorKind},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(String),
    #[error("transaction rejected: {0}")]
    TxExecution(String),
    #[error("wallet error: {0}")]
    Wallet(String),
    #[error("other error: {0}")]
    Other(String),
}

impl From<RpcError<TransportErrorKind>> for Error {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        match err {
            RpcError::ErrorResp(err) if err.code >= -32613 && err.code <= -32000 => {
                Self::TxExecution(err.message.to_string())
            }
            _ => Self::Network(err.to_string()),
        }
    }
}

impl From<PendingTransactionError> for Error {
    fn from(err: PendingTransactionError) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<blob_encoding::Error> for Error {
    fn from(err: blob_encoding::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<kzg::Error> for Error {
    fn from(err: kzg::Error) -> Self {
        Self::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use alloy::rpc::json_rpc::ErrorPayload;
    use test_case::test_case;

    use super::*;

    fn error_resp(code: i64) -> RpcError<TransportErrorKind> {
        RpcError::ErrorResp(ErrorPayload {
            code,
            message: "some message".into(),
            data: None,
        })
    }

    #[test_case(-32_000; "range start")]
    #[test_case(-32_613; "range end")]
    fn execution_error_codes_map_to_tx_execution(code: i64) {
        // when
        let our_error = Error::from(error_resp(code));

        // then
        let Error::TxExecution(msg) = our_error else {
            panic!("expected TxExecution, got: {our_error}")
        };
        assert!(msg.contains("some message"));
    }

    #[test_case(-31_999; "above the range")]
    #[test_case(-32_614; "below the range")]
    fn codes_outside_the_execution_range_map_to_network(code: i64) {
        // when
        let our_error = Error::from(error_resp(code));

        // then
        let Error::Network(msg) = our_error else {
            panic!("expected Network, got: {our_error}")
        };
        assert!(msg.contains("some message"));
    }
}
