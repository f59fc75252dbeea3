//! Wire-level types shared by the news search client crates.

pub mod domain;
pub mod protocol;
