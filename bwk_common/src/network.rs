use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::Error;

/// Version bytes prepended to the hash of a base58check address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressParams {
    /// Prefix of pay-to-pubkey-hash addresses
    pub p2pkh_prefix: u8,
    /// Prefix of pay-to-script-hash addresses
    pub p2sh_prefix: u8,
}

impl AddressParams {
    pub const BITCORE: AddressParams = AddressParams {
        p2pkh_prefix: 3,
        p2sh_prefix: 125,
    };

    pub const BITCOIN: AddressParams = AddressParams {
        p2pkh_prefix: 0,
        p2sh_prefix: 5,
    };

    pub const TESTNET: AddressParams = AddressParams {
        p2pkh_prefix: 111,
        p2sh_prefix: 196,
    };
}

/// The chain an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// BitCore mainnet
    Bitcore,
    /// Bitcoin mainnet
    Bitcoin,
    /// Bitcoin testnet
    Testnet,
}

impl Network {
    /// Return true if the network is a mainnet.
    pub fn is_mainnet(&self) -> bool {
        !matches!(self, Network::Testnet)
    }

    /// Return the base58 prefixes of the addresses of this network.
    pub fn address_params(&self) -> &'static AddressParams {
        match self {
            Network::Bitcore => &AddressParams::BITCORE,
            Network::Bitcoin => &AddressParams::BITCOIN,
            Network::Testnet => &AddressParams::TESTNET,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Bitcore => "bitcore",
            Network::Bitcoin => "bitcoin",
            Network::Testnet => "testnet",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bitcore" => Ok(Network::Bitcore),
            "bitcoin" => Ok(Network::Bitcoin),
            "testnet" => Ok(Network::Testnet),
            _ => Err(Error::InvalidNetwork(s.to_string())),
        }
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let string = String::deserialize(d)?;
        string.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_distinct_across_networks() {
        let all = [Network::Bitcore, Network::Bitcoin, Network::Testnet];
        let mut prefixes: Vec<u8> = all
            .iter()
            .flat_map(|n| {
                let p = n.address_params();
                [p.p2pkh_prefix, p.p2sh_prefix]
            })
            .collect();
        prefixes.sort();
        prefixes.dedup();
        assert_eq!(prefixes.len(), 6);
    }

    #[test]
    fn network_string_roundtrip() {
        for network in [Network::Bitcore, Network::Bitcoin, Network::Testnet] {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
            let json = serde_json::to_string(&network).unwrap();
            assert_eq!(serde_json::from_str::<Network>(&json).unwrap(), network);
        }
        let err = "liquid".parse::<Network>().unwrap_err();
        assert!(err.to_string().contains("'liquid'"));
        assert!(!Network::Testnet.is_mainnet());
    }
}
