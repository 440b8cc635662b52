#![cfg_attr(not(test), deny(clippy::unwrap_used))]

//! A crate containing common code used in multiple other crate in the workspace, such as:
//!
//!  * [`Network`] and its [`AddressParams`], the version bytes of base58check addresses
//!  * [`Address`]: a pay-to-pubkey-hash or pay-to-script-hash address with its locking script
//!  * [`Utxo`]: an unspent output as reported by a block explorer
//!
//!  To avoid circular dependencies this crate must not depend on other crate of the workspace

mod address;
mod error;
mod model;
mod network;

pub use crate::address::{Address, Payload};
pub use crate::error::Error;
pub use crate::model::{total_value, Utxo};
pub use crate::network::{AddressParams, Network};

pub use elements::bitcoin;
