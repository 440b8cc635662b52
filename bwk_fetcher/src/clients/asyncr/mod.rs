//! Async clients, the blocking ones in [`crate::blocking`] wrap these.

mod cryptoid;

pub use cryptoid::{CryptoidClient, CryptoidClientBuilder};
