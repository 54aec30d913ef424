//! The pegged-pair swap pool.

mod pegged;

pub use pegged::PeggedPool;
