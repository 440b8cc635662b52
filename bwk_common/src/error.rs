use crate::Network;

#[allow(missing_docs)]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Base58(#[from] elements::bitcoin::base58::Error),

    #[error("Address payload is {0} bytes, expected 21")]
    InvalidAddressLength(usize),

    #[error("Address prefix {prefix} is not valid on {network}")]
    WrongNetwork { prefix: u8, network: Network },

    #[error("invalid network '{0}', possible values are: 'bitcore', 'bitcoin', 'testnet'")]
    InvalidNetwork(String),
}
