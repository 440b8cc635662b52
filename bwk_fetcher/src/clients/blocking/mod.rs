//! Clients blocking the calling thread until the explorer answers.

mod cryptoid;

pub use cryptoid::CryptoidClient;
