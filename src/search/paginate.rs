//! Pagination of ranked result lists.

use crate::types::{PageSize, Paginated};
use std::marker::PhantomData;
use std::num::NonZeroUsize;

/// A countable, sliceable collection of items.
pub trait ItemSource<T> {
    /// Total number of items available.
    fn count(&self) -> usize;

    /// Up to `limit` items starting at `offset`. Out-of-range offsets yield
    /// no items.
    fn slice(&self, offset: usize, limit: usize) -> Vec<T>;
}

impl<T: Clone> ItemSource<T> for [T] {
    fn count(&self) -> usize {
        self.len()
    }

    fn slice(&self, offset: usize, limit: usize) -> Vec<T> {
        self.iter().skip(offset).take(limit).cloned().collect()
    }
}

impl<T: Clone> ItemSource<T> for Vec<T> {
    fn count(&self) -> usize {
        self.len()
    }

    fn slice(&self, offset: usize, limit: usize) -> Vec<T> {
        self.as_slice().slice(offset, limit)
    }
}

/// Slices an [`ItemSource`] into 1-based pages.
#[derive(Debug, Clone, Copy)]
pub struct Paginator<T> {
    page: NonZeroUsize,
    size: PageSize,
    _item: PhantomData<fn() -> T>,
}

impl<T> Paginator<T> {
    pub const fn new(page: NonZeroUsize, size: PageSize) -> Self {
        Self {
            page,
            size,
            _item: PhantomData,
        }
    }

    /// Produce one page of `source`.
    ///
    /// `total` is the size of the unfiltered collection the source was drawn
    /// from and is reported as `count`.
    pub fn paginate<S>(&self, source: &S, total: usize) -> Paginated<T>
    where
        S: ItemSource<T> + ?Sized,
    {
        let count_filtered = source.count();

        let rows = match self.size {
            PageSize::All => source.slice(0, count_filtered),
            PageSize::Fixed(size) => {
                let offset = (self.page.get() - 1).saturating_mul(size.get());
                source.slice(offset, size.get())
            }
        };

        Paginated {
            rows,
            count: total,
            count_filtered,
            page: self.page.get(),
            size: self.size.reported(),
        }
    }
}

/// Convenience wrapper around [`Paginator::paginate`].
pub fn paginate<T, S>(source: &S, page: NonZeroUsize, size: PageSize, total: usize) -> Paginated<T>
where
    S: ItemSource<T> + ?Sized,
{
    Paginator::new(page, size).paginate(source, total)
}
