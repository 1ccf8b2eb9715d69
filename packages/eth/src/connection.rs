use alloy::{
    consensus::{BlobTransactionSidecar, Transaction},
    eips::eip1559::Eip1559Estimation,
    network::{Ethereum, EthereumWallet, TransactionBuilder, TransactionBuilder4844},
    primitives::{Address, B256, Bytes, U256},
    providers::{Provider, ProviderBuilder, SendableTx},
    rpc::types::{TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
};
use tracing::info;
use url::Url;

use crate::error::{Error, Result};

pub(crate) type HttpProvider = alloy::providers::fillers::FillProvider<
    alloy::providers::fillers::JoinFill<
        alloy::providers::fillers::JoinFill<
            alloy::providers::Identity,
            alloy::providers::fillers::JoinFill<
                alloy::providers::fillers::GasFiller,
                alloy::providers::fillers::JoinFill<
                    alloy::providers::fillers::BlobGasFiller,
                    alloy::providers::fillers::JoinFill<
                        alloy::providers::fillers::NonceFiller,
                        alloy::providers::fillers::ChainIdFiller,
                    >,
                >,
            >,
        >,
        alloy::providers::fillers::WalletFiller<EthereumWallet>,
    >,
    alloy::providers::RootProvider<Ethereum>,
    Ethereum,
>;

const POINT_EVALUATION_ADDRESS: Address = Address::with_last_byte(0x0a);
const POINT_EVALUATION_INPUT_LEN: usize = 192;
const POINT_EVALUATION_OUTPUT_LEN: usize = 64;

#[derive(Debug, Clone, Copy)]
pub struct FeeQuote {
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
    pub blob_base_fee: u128,
}

/// A blob transaction before filling: the recipient, the attached value, the
/// sidecar, and the versioned hashes the sidecar is expected to resolve to.
pub struct BlobTxRequest {
    pub to: Address,
    pub value: U256,
    pub sidecar: BlobTransactionSidecar,
    pub versioned_hashes: Vec<B256>,
}

#[derive(Debug, Clone, Copy)]
pub struct SubmittedTx {
    pub hash: B256,
    pub nonce: u64,
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
    pub max_fee_per_blob_gas: u128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionResponse {
    pub block_number: u64,
    pub succeeded: bool,
    pub fee: u128,
    pub blob_fee: u128,
}

#[derive(Clone)]
pub struct Connection {
    provider: HttpProvider,
    signer_address: Address,
}

impl Connection {
    pub fn connect(url: Url, signer: PrivateKeySigner) -> Self {
        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

        Self {
            provider,
            signer_address,
        }
    }

    pub fn signer_address(&self) -> Address {
        self.signer_address
    }

    /// Fails if the endpoint serves a different chain than the one the
    /// caller expects.
    pub async fn ensure_chain_id(&self, expected: u64) -> Result<()> {
        let actual = self.provider.get_chain_id().await?;
        if actual != expected {
            return Err(Error::Other(format!(
                "endpoint serves chain id {actual}, expected {expected}"
            )));
        }
        Ok(())
    }

    pub async fn balance(&self) -> Result<U256> {
        Ok(self.provider.get_balance(self.signer_address).await?)
    }

    pub async fn fees(&self) -> Result<FeeQuote> {
        let Eip1559Estimation {
            max_fee_per_gas,
            max_priority_fee_per_gas,
        } = self.provider.estimate_eip1559_fees().await?;
        let blob_base_fee = self.provider.get_blob_base_fee().await?;

        Ok(FeeQuote {
            max_fee_per_gas,
            max_priority_fee_per_gas,
            blob_base_fee,
        })
    }

    /// Fills, signs and broadcasts a type-3 transaction. Before anything goes
    /// on the wire the versioned hashes of the signed envelope are checked
    /// against the ones the caller derived by hand.
    pub async fn submit_blob_tx(&self, request: BlobTxRequest) -> Result<SubmittedTx> {
        let tx = TransactionRequest::default()
            .with_to(request.to)
            .with_value(request.value)
            .with_blob_sidecar(request.sidecar);

        let tx = self.provider.fill(tx).await?;
        let SendableTx::Envelope(tx) = tx else {
            return Err(Error::Other(
                "expected a signed envelope from the wallet filler, got a builder".to_string(),
            ));
        };

        let envelope_hashes = tx.blob_versioned_hashes().ok_or_else(|| {
            Error::Other("signed transaction carries no blob versioned hashes".to_string())
        })?;
        if envelope_hashes != request.versioned_hashes {
            return Err(Error::Other(
                "sidecar versioned hashes disagree with the signed transaction".to_string(),
            ));
        }

        let submitted = SubmittedTx {
            hash: *tx.tx_hash(),
            nonce: tx.nonce(),
            max_fee_per_gas: tx.max_fee_per_gas(),
            max_priority_fee_per_gas: tx.max_priority_fee_per_gas().ok_or_else(|| {
                Error::Other("type-3 transaction without a priority fee".to_string())
            })?,
            max_fee_per_blob_gas: tx
                .max_fee_per_blob_gas()
                .ok_or_else(|| Error::Other("type-3 transaction without a blob fee".to_string()))?,
        };

        info!(
            "sending blob tx: {} with nonce: {}, max_fee_per_gas: {}, tip: {}, max_blob_fee_per_gas: {}",
            submitted.hash,
            submitted.nonce,
            submitted.max_fee_per_gas,
            submitted.max_priority_fee_per_gas,
            submitted.max_fee_per_blob_gas
        );

        self.provider.send_tx_envelope(tx).await?;

        Ok(submitted)
    }

    /// Whether the node knows the transaction at all, mined or pending.
    pub async fn transaction_known(&self, tx_hash: B256) -> Result<bool> {
        Ok(self
            .provider
            .get_transaction_by_hash(tx_hash)
            .await?
            .is_some())
    }

    pub async fn get_transaction_response(
        &self,
        tx_hash: B256,
    ) -> Result<Option<TransactionResponse>> {
        let tx_receipt = self.provider.get_transaction_receipt(tx_hash).await?;

        Self::convert_to_tx_response(tx_receipt)
    }

    /// Runs the point-evaluation precompile with the given 192-byte input.
    /// A revert means the proof did not check out and maps to `Ok(false)`.
    pub async fn verify_point_evaluation(&self, input: Bytes) -> Result<bool> {
        if input.len() != POINT_EVALUATION_INPUT_LEN {
            return Err(Error::Other(format!(
                "point evaluation input must be {POINT_EVALUATION_INPUT_LEN} bytes, got {}",
                input.len()
            )));
        }

        let tx = TransactionRequest::default()
            .with_to(POINT_EVALUATION_ADDRESS)
            .with_input(input);

        match self.provider.call(tx).await {
            Ok(output) => Ok(output.len() == POINT_EVALUATION_OUTPUT_LEN),
            Err(err) if err.as_error_resp().is_some() => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn convert_to_tx_response(
        tx_receipt: Option<TransactionReceipt>,
    ) -> Result<Option<TransactionResponse>> {
        let Some(tx_receipt) = tx_receipt else {
            return Ok(None);
        };

        let block_number = tx_receipt.block_number.ok_or_else(|| {
            Error::Other("transaction receipt does not contain block number".to_string())
        })?;

        let fee = u128::from(tx_receipt.gas_used).saturating_mul(tx_receipt.effective_gas_price);
        let blob_fee = tx_receipt
            .blob_gas_used
            .map(u128::from)
            .unwrap_or_default()
            .saturating_mul(tx_receipt.blob_gas_price.unwrap_or_default());

        Ok(Some(TransactionResponse {
            block_number,
            succeeded: tx_receipt.status(),
            fee,
            blob_fee,
        }))
    }
}

/// Lays out `versioned_hash || z || y || commitment || proof`, the input
/// format of the point-evaluation precompile.
pub fn point_evaluation_input(
    versioned_hash: &B256,
    z: &[u8; 32],
    y: &[u8; 32],
    commitment: &kzg::Commitment,
    proof: &kzg::Proof,
) -> Bytes {
    let mut input = Vec::with_capacity(POINT_EVALUATION_INPUT_LEN);
    input.extend_from_slice(versioned_hash.as_slice());
    input.extend_from_slice(z);
    input.extend_from_slice(y);
    input.extend_from_slice(commitment);
    input.extend_from_slice(proof);

    Bytes::from(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn precompile_input_lays_the_segments_out_in_order() {
        // given
        let versioned_hash = B256::repeat_byte(0xaa);
        let z = [0xbb; 32];
        let y = [0xcc; 32];
        let commitment = [0xdd; 48];
        let proof = [0xee; 48];

        // when
        let input = point_evaluation_input(&versioned_hash, &z, &y, &commitment, &proof);

        // then
        assert_eq!(input.len(), 192);
        assert_eq!(&input[..32], versioned_hash.as_slice());
        assert_eq!(&input[32..64], &z);
        assert_eq!(&input[64..96], &y);
        assert_eq!(&input[96..144], &commitment);
        assert_eq!(&input[144..192], &proof);
    }

    #[test]
    fn precompile_address_is_the_tenth() {
        assert_eq!(
            POINT_EVALUATION_ADDRESS.as_slice(),
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x0a]
        );
    }
}
