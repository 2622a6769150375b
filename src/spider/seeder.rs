use crate::seeds::SeedEntry;
use crate::spider::{FetchRequest, Stage};

/// Turns the `[start, end)` slice of the seed list into category requests
///
/// Bounds are clamped to the list length and an empty or inverted range
/// yields no requests. Each request carries its own URL as category
/// context; URLs are not validated here.
pub fn seed_requests(seeds: &[SeedEntry], start: usize, end: usize) -> Vec<FetchRequest> {
    let end = end.min(seeds.len());
    if start >= end {
        return Vec::new();
    }

    seeds[start..end]
        .iter()
        .map(|seed| FetchRequest::new(seed.url.clone(), seed.url.clone(), Stage::Category))
        .collect()
}
