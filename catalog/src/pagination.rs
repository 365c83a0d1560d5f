// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;

/// Cursor of the last non-empty page: `size * floor(len / size)`, pulled back
/// one page when `len` is an exact multiple so the trailing page isn't empty.
pub fn last_cursor(len: usize, page_size: usize) -> usize {
    let cursor = page_size * (len / page_size);

    if len % page_size == 0 {
        cursor.saturating_sub(page_size)
    } else {
        cursor
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Pager {
    page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Result<Self, ErrorKind> {
        if page_size == 0 {
            Err(ErrorKind::ZeroPageSize)
        } else {
            Ok(Self { page_size })
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The visible window is `items[cursor..cursor + page_size]`, clamped to
    /// the slice bounds.
    pub fn page<'a, T>(&self, items: &'a [T], cursor: usize) -> Page<'a, T> {
        let start = cursor.min(items.len());
        let end = cursor.saturating_add(self.page_size).min(items.len());

        Page {
            items: &items[start..end],
            cursor,
            page_size: self.page_size,
            total: items.len(),
        }
    }

    /// Build an iterator that returns every page in order
    pub fn pages<'a, T>(&self, items: &'a [T]) -> Pages<'a, T> {
        Pages {
            curr_offset: 0,
            pager: *self,
            items,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub cursor: usize,
    pub page_size: usize,
    pub total: usize,
}

impl<'a, T> Page<'a, T> {
    pub fn has_prev(&self) -> bool {
        self.cursor > 0
    }

    pub fn has_next(&self) -> bool {
        self.cursor.saturating_add(self.page_size) < self.total
    }

    pub fn first_cursor(&self) -> Option<usize> {
        if self.has_prev() {
            Some(0)
        } else {
            None
        }
    }

    pub fn prev_cursor(&self) -> Option<usize> {
        if self.has_prev() {
            Some(self.cursor.saturating_sub(self.page_size))
        } else {
            None
        }
    }

    pub fn next_cursor(&self) -> Option<usize> {
        if self.has_next() {
            Some(self.cursor + self.page_size)
        } else {
            None
        }
    }

    pub fn last_cursor(&self) -> Option<usize> {
        if self.has_next() {
            Some(last_cursor(self.total, self.page_size))
        } else {
            None
        }
    }
}

pub struct Pages<'a, T> {
    curr_offset: usize,
    pager: Pager,
    items: &'a [T],
}

impl<'a, T> Iterator for Pages<'a, T> {
    type Item = Page<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.curr_offset >= self.items.len() {
            return None;
        }

        let page = self.pager.page(self.items, self.curr_offset);
        self.curr_offset += self.pager.page_size;
        Some(page)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.curr_offset = n * self.pager.page_size;
        self.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks(len: u32) -> Vec<u32> {
        (1..=len).collect()
    }

    #[test]
    fn last_cursor_boundaries() {
        assert_eq!(last_cursor(23, 10), 20);
        assert_eq!(last_cursor(20, 10), 10);
        assert_eq!(last_cursor(9, 10), 0);
        assert_eq!(last_cursor(10, 10), 0);
        assert_eq!(last_cursor(0, 10), 0);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(Pager::new(0), Err(ErrorKind::ZeroPageSize));
    }

    #[test]
    fn pages_of_23() {
        let ranks = ranks(23);
        let pager = Pager::new(10).unwrap();

        let first = pager.page(&ranks, 0);
        assert_eq!(first.items, &ranks[0..10]);
        assert_eq!(first.prev_cursor(), None);
        assert_eq!(first.first_cursor(), None);
        assert_eq!(first.next_cursor(), Some(10));
        assert_eq!(first.last_cursor(), Some(20));

        let middle = pager.page(&ranks, 10);
        assert_eq!(middle.items, &ranks[10..20]);
        assert_eq!(middle.prev_cursor(), Some(0));
        assert_eq!(middle.next_cursor(), Some(20));

        let last = pager.page(&ranks, 20);
        assert_eq!(last.items, &ranks[20..23]);
        assert_eq!(last.prev_cursor(), Some(10));
        assert_eq!(last.first_cursor(), Some(0));
        assert_eq!(last.next_cursor(), None);
        assert_eq!(last.last_cursor(), None);
    }

    #[test]
    fn no_empty_trailing_page() {
        let ranks = ranks(20);
        let pager = Pager::new(10).unwrap();

        let first = pager.page(&ranks, 0);
        assert_eq!(first.last_cursor(), Some(10));

        let second = pager.page(&ranks, 10);
        assert!(!second.has_next());
        assert_eq!(second.items.len(), 10);
    }

    #[test]
    fn cursor_past_the_end() {
        let ranks = ranks(5);
        let pager = Pager::new(10).unwrap();

        let page = pager.page(&ranks, 30);
        assert!(page.items.is_empty());
        assert_eq!(page.prev_cursor(), Some(20));
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn lazy_pages() {
        let ranks = ranks(23);
        let pager = Pager::new(10).unwrap();

        let sizes: Vec<_> = pager.pages(&ranks).map(|page| page.items.len()).collect();
        assert_eq!(sizes, vec![10, 10, 3]);

        let cursors: Vec<_> = pager.pages(&ranks).map(|page| page.cursor).collect();
        assert_eq!(cursors, vec![0, 10, 20]);

        assert_eq!(pager.pages(&ranks).nth(2).map(|p| p.cursor), Some(20));
        assert!(pager.pages(&ranks).nth(3).is_none());
        assert!(pager.pages::<u32>(&[]).next().is_none());
    }

    #[test]
    fn page_count_matches_last_cursor() {
        let pager = Pager::new(10).unwrap();

        for len in &[1, 9, 10, 11, 20, 23] {
            let ranks = ranks(*len);
            let last = pager.pages(&ranks).last().map(|page| page.cursor);

            assert_eq!(last, Some(last_cursor(ranks.len(), 10)));
        }

        assert_eq!(pager.pages(&ranks(20)).count(), 2);
        assert_eq!(pager.pages(&ranks(23)).count(), 3);
    }
}
