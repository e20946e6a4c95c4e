use std::{num::NonZeroUsize, ops::RangeInclusive};
use thiserror::Error;

pub const ALBUMS_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(24).unwrap();

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
#[error("Page {page} does not exist, there are {page_count} pages")]
pub struct PageOutOfRangeError {
    pub page: usize,
    pub page_count: usize,
}

/// Fixed page-size slicing over an already fetched collection. Pages are 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Paginator {
    page_size: Option<NonZeroUsize>,
    page: NonZeroUsize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl Paginator {
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size: Some(page_size),
            page: NonZeroUsize::MIN,
        }
    }

    /// Everything on a single page.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            page_size: None,
            page: NonZeroUsize::MIN,
        }
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page.get()
    }

    #[must_use]
    pub fn page_count(&self, total: usize) -> usize {
        match self.page_size {
            Some(size) => total.div_ceil(size.get()),
            None => usize::from(total > 0),
        }
    }

    #[must_use]
    pub fn page_numbers(&self, total: usize) -> RangeInclusive<usize> {
        1..=self.page_count(total)
    }

    pub fn select(&mut self, page: usize, total: usize) -> Result<(), PageOutOfRangeError> {
        let page_count = self.page_count(total);
        match NonZeroUsize::new(page) {
            Some(page) if page.get() <= page_count => {
                self.page = page;
                Ok(())
            }
            _ => Err(PageOutOfRangeError { page, page_count }),
        }
    }

    /// Moves the current page back onto the last existing page after the collection shrank.
    pub fn clamp(&mut self, total: usize) {
        let last = NonZeroUsize::new(self.page_count(total)).unwrap_or(NonZeroUsize::MIN);
        self.page = self.page.min(last);
    }

    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Some(size) = self.page_size else {
            return items;
        };

        let start = (self.page.get() - 1).saturating_mul(size.get());
        let end = start.saturating_add(size.get()).min(items.len());
        items.get(start..end).unwrap_or_default()
    }
}
