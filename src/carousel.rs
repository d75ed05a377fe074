//! Circular carousel index over an ordered list.
//!
//! [`Carousel`] only tracks positions: the current index, how many items the
//! list has, and how many are shown per page. The caller keeps the list and
//! asks for [`Carousel::visible_slice`] when rendering.
//!
//! ```text
//! items:      [a b c d e]      item_count = 5, page_size = 2
//! pages:       ^   ^   ^       starts 0, 2, 4 (last page is short)
//! next():     0 → 2 → 4 → 0
//! previous(): 0 → 3            wraps to the last full window
//! ```
//!
//! No input is an error. Out-of-range page numbers clamp, an empty list is a
//! steady state where navigation does nothing, and changing the page size or
//! the item count re-clamps the index.

use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    current: usize,
    item_count: usize,
    page_size: usize,
}

impl Carousel {
    /// A carousel over `item_count` items showing one at a time.
    pub fn new(item_count: usize) -> Self {
        Self {
            current: 0,
            item_count,
            page_size: 1,
        }
    }

    /// Builder form of [`Self::set_page_size`].
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.set_page_size(page_size);
        self
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages, counting a short last page. Zero when empty.
    pub fn page_count(&self) -> usize {
        self.item_count.div_ceil(self.page_size)
    }

    /// The active indicator dot. A window reaching the end of the list is the
    /// last page even when it starts off a page boundary (after `previous()`
    /// wraps); other unaligned starts round up to the next page.
    pub fn current_page(&self) -> usize {
        if self.current + self.page_size >= self.item_count {
            return self.page_count().saturating_sub(1);
        }
        self.current.div_ceil(self.page_size)
    }

    /// Advance one page, wrapping to the start after the last page.
    pub fn next(&mut self) {
        if self.item_count == 0 {
            return;
        }
        if self.current + self.page_size >= self.item_count {
            self.current = 0;
        } else {
            self.current += self.page_size;
        }
    }

    /// Go back one page, wrapping from the start to the last full window.
    pub fn previous(&mut self) {
        if self.item_count == 0 {
            return;
        }
        if self.current == 0 {
            self.current = self.item_count.saturating_sub(self.page_size);
        } else {
            self.current = self.current.saturating_sub(self.page_size);
        }
    }

    /// Jump to page `page` (an indicator click). Negative pages land on the
    /// first page, pages past the end on the last.
    pub fn select_indicator(&mut self, page: isize) {
        let Some(last_page) = self.page_count().checked_sub(1) else {
            self.current = 0;
            return;
        };
        let page = usize::try_from(page).unwrap_or(0).min(last_page);
        self.current = page * self.page_size;
    }

    /// Change how many items a page shows. The index moves back to the start
    /// of the page it falls in under the new size, so the item that was
    /// first on screen stays on screen.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.realign();
    }

    /// Change the list length, e.g. after the list is filtered.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.realign();
    }

    fn realign(&mut self) {
        if self.item_count == 0 {
            self.current = 0;
            return;
        }
        let last_start = (self.item_count - 1) / self.page_size * self.page_size;
        self.current = (self.current / self.page_size * self.page_size).min(last_start);
    }

    /// Index range of the items on screen, clipped to the list.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.current.min(self.item_count);
        let end = (self.current + self.page_size).min(self.item_count);
        start..end
    }

    /// The items on screen. `items` is clipped to the carousel's item count
    /// and vice versa, so a stale count never indexes out of bounds.
    pub fn visible_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.visible_range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }
}

/// Minimum viewport width at which a page size applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakpoint {
    pub min_width: u32,
    pub page_size: usize,
}

/// Page size for a viewport `width`: the breakpoint with the largest
/// `min_width` not exceeding it. Falls back to 1.
pub fn page_size_for_width(breakpoints: &[Breakpoint], width: u32) -> usize {
    breakpoints
        .iter()
        .filter(|b| b.min_width <= width)
        .max_by_key(|b| b.min_width)
        .map(|b| b.page_size.max(1))
        .unwrap_or(1)
}
