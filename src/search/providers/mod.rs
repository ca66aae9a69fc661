//! The built-in providers and the shared post-processing they apply.

pub mod addresses;
pub mod grid;
pub mod latlon;
pub mod opennames;

pub use addresses::AddressesProvider;
pub use grid::GridRefProvider;
pub use latlon::LatLonProvider;
pub use opennames::OpennamesProvider;

use std::collections::HashMap;
use std::collections::HashSet;

use crate::search::types::SearchResult;

/// Drop every result whose id has already been seen, keeping the first
/// occurrence in order.
pub(crate) fn dedup_by_id(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect()
}

/// Make repeated (name, context) labels tell apart: the second occurrence
/// gets " (2)" appended to its name, the third " (3)", and so on. Ids are
/// untouched.
pub(crate) fn disambiguate_labels(results: &mut [SearchResult]) {
    let mut counts: HashMap<(String, String), u32> = HashMap::new();
    for result in results.iter_mut() {
        let key = (result.name.clone(), result.context.clone());
        let count = counts.entry(key).or_insert(0);
        *count += 1;
        if *count > 1 {
            result.name = format!("{} ({})", result.name, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::types::{Point, SpatialReference};

    fn result(id: &str, name: &str, context: &str) -> SearchResult {
        SearchResult::new(
            id,
            name,
            context,
            Point::new(0.0, 0.0),
            None,
            SpatialReference::WGS84,
        )
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let deduped = dedup_by_id(vec![
            result("1", "a", ""),
            result("2", "b", ""),
            result("1", "c", ""),
        ]);
        let labels: Vec<&str> = deduped.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn disambiguation_numbers_from_two() {
        let mut results = vec![
            result("1", "Newport", "Wales"),
            result("2", "Newport", "Isle of Wight"),
            result("3", "Newport", "Wales"),
            result("4", "Newport", "Wales"),
        ];
        disambiguate_labels(&mut results);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Newport", "Newport", "Newport (2)", "Newport (3)"]);
    }

    #[test]
    fn disambiguation_keys_on_name_and_context() {
        let mut results = vec![
            result("1", "Newport", "Wales"),
            result("2", "Newport", "Isle of Wight"),
        ];
        disambiguate_labels(&mut results);
        assert_eq!(results[0].name, "Newport");
        assert_eq!(results[1].name, "Newport");
    }
}
