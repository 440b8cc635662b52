use elements::bitcoin::{OutPoint, ScriptBuf, Txid};
use serde::Serialize;

/// An unspent output belonging to an address.
///
/// Equality and hashing consider every field, so a set of `Utxo` only collapses exact duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Utxo {
    /// Hash of the transaction creating the output
    pub txid: Txid,

    /// Index of the output in the transaction
    pub vout: u32,

    /// Amount in the smallest unit of the currency
    pub value: u64,

    /// Confirmation height, 0 when unknown
    pub height: u32,

    pub is_coinbase: bool,

    /// Locking script of the output
    pub script_pubkey: ScriptBuf,
}

impl Utxo {
    pub fn outpoint(&self) -> OutPoint {
        OutPoint::new(self.txid, self.vout)
    }
}

/// Sum of the values of the given outputs, saturating at `u64::MAX`
pub fn total_value<'a>(utxos: impl IntoIterator<Item = &'a Utxo>) -> u64 {
    utxos
        .into_iter()
        .fold(0u64, |acc, utxo| acc.saturating_add(utxo.value))
}
