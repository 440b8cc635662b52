use std::fmt;

use elements::bitcoin::base58;
use elements::bitcoin::hashes::Hash;
use elements::bitcoin::{PubkeyHash, ScriptBuf, ScriptHash};
use serde::Serialize;

use crate::{Error, Network};

/// The hash committed to by an [`Address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Payload {
    /// Pay to pubkey hash
    PubkeyHash(PubkeyHash),
    /// Pay to script hash
    ScriptHash(ScriptHash),
}

/// A base58check encoded address of a legacy output type.
///
/// The textual form is `base58check(prefix || hash160)` where the prefix comes from the
/// [`crate::AddressParams`] of the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    network: Network,
    payload: Payload,
}

impl Address {
    /// Create a pay-to-pubkey-hash address
    pub fn p2pkh(hash: PubkeyHash, network: Network) -> Self {
        Self {
            network,
            payload: Payload::PubkeyHash(hash),
        }
    }

    /// Create a pay-to-script-hash address
    pub fn p2sh(hash: ScriptHash, network: Network) -> Self {
        Self {
            network,
            payload: Payload::ScriptHash(hash),
        }
    }

    /// Parse a base58check string, requiring its prefix to belong to `network`
    pub fn parse(s: &str, network: Network) -> Result<Self, Error> {
        let data = base58::decode_check(s)?;
        if data.len() != 21 {
            return Err(Error::InvalidAddressLength(data.len()));
        }
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&data[1..]);

        let params = network.address_params();
        let payload = match data[0] {
            p if p == params.p2pkh_prefix => Payload::PubkeyHash(PubkeyHash::from_byte_array(hash)),
            p if p == params.p2sh_prefix => Payload::ScriptHash(ScriptHash::from_byte_array(hash)),
            prefix => return Err(Error::WrongNetwork { prefix, network }),
        };

        Ok(Self { network, payload })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The canonical textual form, used when querying explorers
    pub fn to_base58(&self) -> String {
        let params = self.network.address_params();
        let mut data = Vec::with_capacity(21);
        match &self.payload {
            Payload::PubkeyHash(hash) => {
                data.push(params.p2pkh_prefix);
                data.extend_from_slice(hash.as_byte_array());
            }
            Payload::ScriptHash(hash) => {
                data.push(params.p2sh_prefix);
                data.extend_from_slice(hash.as_byte_array());
            }
        }
        base58::encode_check(&data)
    }

    /// The standard locking script paying to this address
    pub fn script_pubkey(&self) -> ScriptBuf {
        match &self.payload {
            Payload::PubkeyHash(hash) => ScriptBuf::new_p2pkh(hash),
            Payload::ScriptHash(hash) => ScriptBuf::new_p2sh(hash),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
