use std::{collections::HashSet, fmt::Display, str::FromStr};

use bwk_common::{Address, Utxo};
use elements::bitcoin::Txid;
use serde::{Deserialize, Deserializer};

use crate::Error;

#[cfg(not(target_arch = "wasm32"))]
pub mod blocking;

pub mod asyncr;

/// The cryptoid API endpoint of BitCore mainnet
pub const BITCORE_CRYPTOID_URL: &str = "https://chainz.cryptoid.info/btx/api.dws";

// example:
// {"unspent_outputs":[{"tx_hash":"9a1c...","tx_ouput_n":1,"value":"100000000","confirmations":12}]}
// extra fields are ignored, integers may come as JSON strings
#[derive(Deserialize)]
struct UnspentResponse {
    unspent_outputs: Vec<UnspentOutput>,
}

#[derive(Deserialize)]
struct UnspentOutput {
    tx_hash: Txid,
    #[serde(deserialize_with = "int_or_string")]
    tx_ouput_n: u32,
    #[serde(deserialize_with = "int_or_string")]
    value: u64,
}

fn int_or_string<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Int(T),
        Str(String),
    }

    match Raw::<T>::deserialize(d)? {
        Raw::Int(value) => Ok(value),
        Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Parse the body of an `unspent` query into the set of outputs of `address`.
///
/// The locking script of every output is derived from `address`, height is reported as 0
/// (unknown) and coinbase as false. A single malformed element fails the whole batch.
pub fn parse_unspent(body: &str, address: &Address) -> Result<HashSet<Utxo>, Error> {
    let response: UnspentResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("error {e:?} in converting following text:\n{body}");
            return Err(e.into());
        }
    };

    let script_pubkey = address.script_pubkey();
    Ok(response
        .unspent_outputs
        .into_iter()
        .map(|output| Utxo {
            txid: output.tx_hash,
            vout: output.tx_ouput_n,
            value: output.value,
            height: 0,
            is_coinbase: false,
            script_pubkey: script_pubkey.clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bwk_common::Network;

    use super::*;
    use crate::FetchFailure;

    const ADDRESS: &str = "2N2oLLYFCwfH81SUReTcuhtoEHgwHYHQNq";

    fn address() -> Address {
        Address::parse(ADDRESS, Network::Bitcore).unwrap()
    }

    fn hash(c: char) -> String {
        std::iter::repeat(c).take(64).collect()
    }

    #[test]
    fn single_output() {
        let body = format!(
            r#"{{"unspent_outputs":[{{"tx_hash":"{}","tx_ouput_n":0,"value":1000}}]}}"#,
            hash('a')
        );
        let utxos = parse_unspent(&body, &address()).unwrap();
        assert_eq!(utxos.len(), 1);

        let utxo = utxos.iter().next().unwrap();
        assert_eq!(utxo.txid, Txid::from_str(&hash('a')).unwrap());
        assert_eq!(utxo.vout, 0);
        assert_eq!(utxo.value, 1000);
        assert_eq!(utxo.height, 0);
        assert!(!utxo.is_coinbase);
        assert_eq!(utxo.script_pubkey, address().script_pubkey());
    }

    #[test]
    fn duplicates_collapse_and_extra_fields_are_ignored() {
        let body = format!(
            r#"{{"unspent_outputs":[
                {{"tx_hash":"{a}","tx_ouput_n":0,"value":1000,"confirmations":3}},
                {{"tx_hash":"{a}","tx_ouput_n":0,"value":1000}},
                {{"tx_hash":"{a}","tx_ouput_n":1,"value":1000}},
                {{"tx_hash":"{b}","tx_ouput_n":0,"value":5}}
            ],"other":true}}"#,
            a = hash('a'),
            b = hash('b'),
        );
        let utxos = parse_unspent(&body, &address()).unwrap();
        assert_eq!(utxos.len(), 3);
        assert_eq!(bwk_common::total_value(&utxos), 2005);
    }

    #[test]
    fn integers_as_strings() {
        let body = format!(
            r#"{{"unspent_outputs":[{{"tx_hash":"{}","tx_ouput_n":"2","value":"100000000"}}]}}"#,
            hash('c')
        );
        let utxos = parse_unspent(&body, &address()).unwrap();
        let utxo = utxos.iter().next().unwrap();
        assert_eq!(utxo.vout, 2);
        assert_eq!(utxo.value, 100_000_000);
    }

    #[test]
    fn empty_array() {
        let utxos = parse_unspent(r#"{"unspent_outputs":[]}"#, &address()).unwrap();
        assert!(utxos.is_empty());
    }

    fn outputs(elements: &str) -> String {
        format!(r#"{{"unspent_outputs":[{elements}]}}"#)
    }

    #[test]
    fn malformed_bodies_fail_the_whole_batch() {
        let good = format!(r#"{{"tx_hash":"{}","tx_ouput_n":0,"value":1}}"#, hash('a'));
        let bodies = [
            "not json".to_string(),
            "[]".to_string(),
            r#"{"unspent":[]}"#.to_string(),
            format!(r#"{{"unspent_outputs":[{good},{{"tx_ouput_n":0,"value":1}}]}}"#),
            outputs(&format!(r#"{good},{{"tx_hash":"{}","value":1}}"#, hash('b'))),
            outputs(&format!(r#"{good},{{"tx_hash":"{}","tx_ouput_n":0}}"#, hash('b'))),
            // not 32 bytes
            outputs(r#"{"tx_hash":"aabb","tx_ouput_n":0,"value":1}"#),
            outputs(&format!(r#"{{"tx_hash":"{}","tx_ouput_n":0,"value":-1}}"#, hash('a'))),
            outputs(&format!(r#"{{"tx_hash":"{}","tx_ouput_n":0,"value":1.5}}"#, hash('a'))),
            outputs(&format!(r#"{{"tx_hash":"{}","tx_ouput_n":"x","value":1}}"#, hash('a'))),
            outputs(&format!("{good},3")),
        ];
        for body in bodies {
            let err = parse_unspent(&body, &address()).unwrap_err();
            assert!(matches!(err, Error::JsonFrom(_)), "{body}");
            assert!(matches!(FetchFailure::from(&err), FetchFailure::Io(_)));
        }
    }
}
