//! Route display: source leg, intermediate hops, destination leg.

use shared_types::Asset;

/// Full route with consecutive duplicate hops collapsed.
pub fn build_route(source: &Asset, path: &[Asset], destination: &Asset) -> Vec<Asset> {
    let mut route: Vec<Asset> = Vec::with_capacity(path.len() + 2);
    for hop in std::iter::once(source)
        .chain(path.iter())
        .chain(std::iter::once(destination))
    {
        if route.last() != Some(hop) {
            route.push(hop.clone());
        }
    }
    route
}
