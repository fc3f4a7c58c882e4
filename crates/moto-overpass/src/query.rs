//! Overpass QL construction.

use moto_core::CountryCode;

/// Server-side execution limit declared in every query, in seconds.
pub const QUERY_TIMEOUT_SECS: u32 = 60;

/// Builds the Overpass QL query for one country.
///
/// Matches nodes inside the country's `admin_level=2` boundary that are a
/// motorcycle shop, a motorcycle craft workshop, or a car repair shop tagged
/// as servicing motorcycles. `out center` asks the server to attach a centroid
/// to any non-node element.
#[must_use]
pub fn build_query(country: &CountryCode) -> String {
    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n\
         area[\"ISO3166-1\"=\"{country}\"][admin_level=2];\n\
         (\n  \
           node[\"shop\"=\"motorcycle\"](area);\n  \
           node[\"craft\"=\"motorcycle\"](area);\n  \
           node[\"amenity\"=\"car_repair\"][\"motorcycle\"=\"yes\"](area);\n\
         );\n\
         out center;\n"
    )
}
