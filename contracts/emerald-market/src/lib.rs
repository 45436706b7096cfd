//! Fixed-price marketplace for CIS-2 tokens.
//!
//! Owners list a token they hold at a price, after making this contract an
//! operator on the token contract. Buyers pay at least the listed price and
//! receive the token; the price is credited to the seller, who later pulls it
//! out with `withdraw`.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod contract;
pub mod events;
pub mod external;
pub mod state;

mod registry;
