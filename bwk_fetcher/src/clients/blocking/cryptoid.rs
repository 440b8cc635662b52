use std::collections::HashSet;

use bwk_common::{Address, Utxo};
use tokio::runtime::Runtime;
use url::Url;

use crate::clients::asyncr::{self, CryptoidClientBuilder};
use crate::Error;

impl CryptoidClientBuilder {
    /// Build a blocking cryptoid client
    pub fn build_blocking(self) -> Result<CryptoidClient, Error> {
        Ok(CryptoidClient {
            rt: Runtime::new()?,
            client: CryptoidClientBuilder::build(self)?,
        })
    }
}

/// A client of the cryptoid block explorer API blocking the caller until the response arrives.
///
/// It owns a tokio runtime, so it must not be used from async code.
#[derive(Debug)]
pub struct CryptoidClient {
    rt: Runtime,
    client: asyncr::CryptoidClient,
}

impl CryptoidClient {
    /// Create a new blocking client with default settings
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, Error> {
        CryptoidClientBuilder::new(base_url, api_key).build_blocking()
    }

    pub fn unspent_url(&self, address: &Address) -> Url {
        self.client.unspent_url(address)
    }

    /// Returns the unspent outputs of `address`
    pub fn unspent(&self, address: &Address) -> Result<HashSet<Utxo>, Error> {
        self.rt.block_on(self.client.unspent(address))
    }
}
