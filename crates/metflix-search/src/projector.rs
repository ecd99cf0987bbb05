//! Read-only views over accumulated results

use metflix_core::{MediaKind, ResultItem};

use crate::accumulator::AccumulatedState;

/// Which media kinds a view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KindFilter {
    #[default]
    All,
    Movie,
    Tv,
}

impl KindFilter {
    pub fn matches(&self, item: &ResultItem) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Movie => item.kind() == MediaKind::Movie,
            KindFilter::Tv => item.kind() == MediaKind::Tv,
        }
    }
}

impl From<MediaKind> for KindFilter {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Movie => KindFilter::Movie,
            MediaKind::Tv => KindFilter::Tv,
        }
    }
}

/// Filtered items in accumulation order
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<'a> {
    pub items: Vec<&'a ResultItem>,
    pub count: usize,
}

/// Select the items matching `filter`
pub fn project(state: &AccumulatedState, filter: KindFilter) -> Projection<'_> {
    let items: Vec<&ResultItem> = state
        .items()
        .iter()
        .filter(|item| filter.matches(item))
        .collect();
    let count = items.len();
    Projection { items, count }
}

/// Item counts per media kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub movie: usize,
    pub tv: usize,
    pub total: usize,
}

impl KindCounts {
    /// The count shown next to a filter tab
    pub fn get(&self, filter: KindFilter) -> usize {
        match filter {
            KindFilter::All => self.total,
            KindFilter::Movie => self.movie,
            KindFilter::Tv => self.tv,
        }
    }
}

pub fn counts_by_kind(state: &AccumulatedState) -> KindCounts {
    state
        .items()
        .iter()
        .fold(KindCounts::default(), |mut counts, item| {
            match item.kind() {
                MediaKind::Movie => counts.movie += 1,
                MediaKind::Tv => counts.tv += 1,
            }
            counts.total += 1;
            counts
        })
}
