//! Client and normalizer for the Overpass geodata query service.
//!
//! [`OverpassClient`] fetches every motorcycle shop, motorcycle craft
//! workshop and motorcycle-capable car repair node inside one country;
//! [`normalize_element`] turns each returned element into a [`ShopRecord`].
//!
//! [`ShopRecord`]: moto_core::ShopRecord

pub mod client;
pub mod error;
pub mod normalize;
pub mod query;
pub mod types;

pub use client::OverpassClient;
pub use error::OverpassError;
pub use normalize::{normalize_element, normalize_elements};
pub use query::build_query;
pub use types::{Center, OverpassResponse, RawElement};
