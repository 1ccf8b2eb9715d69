use kzg::NativeKzg;

use crate::{
    config::Config,
    errors::{Error, Result},
};

pub fn setup_logger() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_line_number(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Wallet-backed connection to the configured endpoint. The private key is
/// read from configuration, never from argv.
pub async fn connect(config: &Config) -> Result<eth::Connection> {
    let eth_config = config.eth.as_ref().ok_or_else(|| {
        Error::Other(
            "eth configuration missing: set BLOB_LAB__ETH__RPC and BLOB_LAB__ETH__PRIVATE_KEY"
                .to_string(),
        )
    })?;

    let signer = eth::signer_from_hex(&eth_config.private_key)?;
    let connection = eth::Connection::connect(eth_config.rpc.clone(), signer);

    if let Some(chain_id) = eth_config.chain_id {
        connection.ensure_chain_id(chain_id).await?;
    }

    Ok(connection)
}

pub fn native_backend(config: &Config) -> Result<NativeKzg> {
    match &config.app.trusted_setup_path {
        Some(path) => Ok(NativeKzg::from_trusted_setup_file(path)?),
        None => Ok(NativeKzg::default()),
    }
}
