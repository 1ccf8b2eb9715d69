//! The Sepolia-facing side of the demos: a wallet-backed HTTP provider plus
//! the handful of JSON-RPC calls the demos make against it.

mod connection;
mod error;
mod signer;

pub use alloy::primitives::{Address, B256, U256};
pub use connection::{
    BlobTxRequest, Connection, FeeQuote, SubmittedTx, TransactionResponse,
    point_evaluation_input,
};
pub use error::{Error, Result};
pub use signer::signer_from_hex;
