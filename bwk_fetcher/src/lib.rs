#![cfg_attr(not(test), deny(clippy::unwrap_used))]

//! # Fetcher
//!
//! Query a block explorer for the unspent outputs of an address.
//!
//! The explorer is reached through a [`CryptoidClient`], either async or [`blocking`].
//! [`BalanceFetcher`] runs the query on a worker runtime and hands the outcome back to the
//! [`Looper`] of the thread that created it, through a [`ResultCallback`].

mod clients;
mod error;
mod fetcher;
mod looper;
mod message;

pub use crate::clients::asyncr::{CryptoidClient, CryptoidClientBuilder};
#[cfg(not(target_arch = "wasm32"))]
pub use crate::clients::blocking;
pub use crate::clients::{parse_unspent, BITCORE_CRYPTOID_URL};
pub use crate::error::Error;
pub use crate::fetcher::{BalanceFetcher, ResultCallback};
pub use crate::looper::{Handler, Looper};
pub use crate::message::{FetchFailure, MessageArg, MessageId};

pub use bwk_common::{self, Address, Network, Utxo};
