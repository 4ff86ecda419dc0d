//! # Algorithms Module

pub mod xdr;

pub use xdr::decode_xdr;
