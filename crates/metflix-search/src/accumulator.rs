//! Pagination accumulator
//!
//! Merges successive pages of one query generation into a single ordered,
//! duplicate-free result set.

use std::collections::HashSet;

use metflix_core::{ItemId, PageResponse, ResultItem};
use tracing::debug;

use crate::generation::Generation;

/// Results gathered so far for one query generation
///
/// Only an [`Accumulator`] can change this. Callers receive it by reference
/// or as a cloned snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatedState {
    items: Vec<ResultItem>,
    seen: HashSet<ItemId>,
    current_page: u32,
    total_pages: u32,
    total_results: u64,
    generation: Generation,
}

impl Default for AccumulatedState {
    fn default() -> Self {
        Self::empty(Generation::INITIAL)
    }
}

impl AccumulatedState {
    fn empty(generation: Generation) -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            current_page: 0,
            total_pages: 1,
            total_results: 0,
            generation,
        }
    }

    /// Items in the order they were first received
    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.seen.contains(id)
    }

    /// Last page merged, 0 before the first page arrives
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Total reported by the source, not the number of items held
    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_more().then(|| self.current_page + 1)
    }
}

/// Result of offering a page to the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The page was merged
    Applied { added: usize, duplicates: usize },
    /// The page belongs to an older generation and was dropped
    Stale,
}

/// Owns an [`AccumulatedState`] and applies pages to it
#[derive(Debug, Default)]
pub struct Accumulator {
    state: AccumulatedState,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AccumulatedState {
        &self.state
    }

    pub fn snapshot(&self) -> AccumulatedState {
        self.state.clone()
    }

    /// Discard everything and start collecting for `generation`
    pub fn reset(&mut self, generation: Generation) {
        self.state = AccumulatedState::empty(generation);
    }

    /// Merge a page fetched under `generation`
    ///
    /// Items already present keep their first position; repeats are
    /// dropped. The page counters follow the response, with `total_pages`
    /// never below the page just merged.
    pub fn append_page(&mut self, generation: Generation, page: PageResponse) -> AppendOutcome {
        if generation != self.state.generation {
            debug!(
                "Dropping page {} from {} (accumulating {})",
                page.page_number, generation, self.state.generation
            );
            return AppendOutcome::Stale;
        }

        let mut added = 0;
        let mut duplicates = 0;
        for item in page.items {
            if self.state.seen.insert(item.id) {
                self.state.items.push(item);
                added += 1;
            } else {
                duplicates += 1;
            }
        }

        self.state.current_page = page.page_number;
        self.state.total_pages = page.total_pages.max(page.page_number);
        self.state.total_results = page.total_results;

        if duplicates > 0 {
            debug!(
                "Page {} for {} repeated {} items",
                page.page_number, generation, duplicates
            );
        }

        AppendOutcome::Applied { added, duplicates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::StalenessGuard;

    fn movies(ids: &[u64]) -> Vec<ResultItem> {
        ids.iter()
            .map(|&id| ResultItem::movie(id, format!("Movie {id}")))
            .collect()
    }

    fn ids(state: &AccumulatedState) -> Vec<ItemId> {
        state.items().iter().map(|item| item.id).collect()
    }

    #[test]
    fn test_starts_empty() {
        let acc = Accumulator::new();
        let state = acc.state();
        assert!(state.is_empty());
        assert_eq!(state.current_page(), 0);
        assert_eq!(state.total_pages(), 1);
        assert_eq!(state.next_page(), Some(1));
    }

    #[test]
    fn test_append_first_page() {
        let guard = StalenessGuard::new();
        let generation = guard.begin_generation();
        let mut acc = Accumulator::new();
        acc.reset(generation);

        let outcome = acc.append_page(
            generation,
            PageResponse::new(movies(&[1, 2, 3]), 1, 5).with_total_results(100),
        );

        assert_eq!(outcome, AppendOutcome::Applied { added: 3, duplicates: 0 });
        let state = acc.state();
        assert_eq!(state.len(), 3);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.total_pages(), 5);
        assert_eq!(state.total_results(), 100);
        assert_eq!(state.next_page(), Some(2));
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let guard = StalenessGuard::new();
        let generation = guard.begin_generation();
        let mut acc = Accumulator::new();
        acc.reset(generation);

        acc.append_page(generation, PageResponse::new(movies(&[1, 2, 3]), 1, 3));
        let outcome = acc.append_page(generation, PageResponse::new(movies(&[3, 4, 1, 5]), 2, 3));

        assert_eq!(outcome, AppendOutcome::Applied { added: 2, duplicates: 2 });
        assert_eq!(
            ids(acc.state()),
            [1, 2, 3, 4, 5].map(ItemId::movie).to_vec()
        );
        assert_eq!(acc.state().current_page(), 2);
    }

    #[test]
    fn test_same_page_twice_is_idempotent() {
        let guard = StalenessGuard::new();
        let generation = guard.begin_generation();
        let mut acc = Accumulator::new();
        acc.reset(generation);

        let page = PageResponse::new(movies(&[7, 8]), 1, 2);
        acc.append_page(generation, page.clone());
        let before = acc.snapshot();
        acc.append_page(generation, page);

        assert_eq!(acc.snapshot(), before);
    }

    #[test]
    fn test_same_remote_id_different_kind_is_distinct() {
        let guard = StalenessGuard::new();
        let generation = guard.begin_generation();
        let mut acc = Accumulator::new();
        acc.reset(generation);

        let page = PageResponse::new(
            vec![ResultItem::movie(42, "A Movie"), ResultItem::tv(42, "A Show")],
            1,
            1,
        );
        acc.append_page(generation, page);
        assert_eq!(acc.state().len(), 2);
    }

    #[test]
    fn test_stale_page_is_dropped() {
        let guard = StalenessGuard::new();
        let old = guard.begin_generation();
        let new = guard.begin_generation();
        let mut acc = Accumulator::new();
        acc.reset(new);

        let outcome = acc.append_page(old, PageResponse::new(movies(&[1]), 1, 1));

        assert_eq!(outcome, AppendOutcome::Stale);
        assert!(acc.state().is_empty());
        assert_eq!(acc.state().current_page(), 0);
        assert_eq!(acc.state().generation(), new);
    }

    #[test]
    fn test_last_page_has_no_more() {
        let guard = StalenessGuard::new();
        let generation = guard.begin_generation();
        let mut acc = Accumulator::new();
        acc.reset(generation);

        acc.append_page(generation, PageResponse::new(movies(&[1]), 2, 2));
        assert!(!acc.state().has_more());
        assert_eq!(acc.state().next_page(), None);
    }

    #[test]
    fn test_empty_result_clamps_total_pages() {
        let guard = StalenessGuard::new();
        let generation = guard.begin_generation();
        let mut acc = Accumulator::new();
        acc.reset(generation);

        acc.append_page(generation, PageResponse::new(Vec::new(), 1, 0));
        let state = acc.state();
        assert_eq!(state.total_pages(), 1);
        assert!(state.current_page() <= state.total_pages());
        assert!(!state.has_more());
    }

    #[test]
    fn test_reset_clears_items() {
        let guard = StalenessGuard::new();
        let first = guard.begin_generation();
        let mut acc = Accumulator::new();
        acc.reset(first);
        acc.append_page(first, PageResponse::new(movies(&[1, 2]), 1, 4));

        let second = guard.begin_generation();
        acc.reset(second);

        let state = acc.state();
        assert!(state.is_empty());
        assert!(!state.contains(&ItemId::movie(1)));
        assert_eq!(state.current_page(), 0);
        assert_eq!(state.total_pages(), 1);
        assert_eq!(state.generation(), second);
    }
}
