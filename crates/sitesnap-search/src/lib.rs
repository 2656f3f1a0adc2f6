//! Fuzzy search over the sitesnap catalog.
//!
//! The pipeline is: build a [`SearchIndex`] from a company snapshot, run queries through a
//! [`SearchEngine`], then fold the ranked matches into [`GroupedResults`] for display. Live
//! input goes through a [`Debouncer`] so the engine runs once per pause in typing.

#![warn(missing_docs)]

mod debounce;
mod engine;
mod group;
mod index;
#[cfg(test)]
mod test_support;

pub use debounce::{Debouncer, Pending};
pub use engine::{FieldMatch, SearchEngine, SearchMatch, SearchOptions};
pub use group::{GroupEntry, GroupedResults, group_matches};
pub use index::{SearchIndex, SearchKey, SearchRecord, build_index};
use sitesnap_catalog::Company;

/// Builds an index from `companies`, runs `query` and groups the results.
pub fn search_grouped(
    engine: &SearchEngine,
    companies: &[Company],
    query: &str,
) -> GroupedResults {
    let index = SearchIndex::build(companies);
    let matches = engine.search(&index, query);
    group_matches(&matches, &index)
}
