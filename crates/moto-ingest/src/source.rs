use std::future::Future;

use moto_core::CountryCode;
use moto_overpass::{OverpassClient, OverpassError, RawElement};

/// Something that can list the raw map elements for one country.
///
/// [`OverpassClient`] is the production implementation; tests substitute
/// fakes.
pub trait ShopSource {
    fn fetch(
        &self,
        country: &CountryCode,
    ) -> impl Future<Output = Result<Vec<RawElement>, OverpassError>> + Send;
}

impl ShopSource for OverpassClient {
    fn fetch(
        &self,
        country: &CountryCode,
    ) -> impl Future<Output = Result<Vec<RawElement>, OverpassError>> + Send {
        self.fetch_country(country)
    }
}
