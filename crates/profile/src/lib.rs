//! `shopledger-profile` — shop profile (owner settings) domain.

pub mod shop_profile;

pub use shop_profile::{ShopProfile, ShopProfileUpdate};
