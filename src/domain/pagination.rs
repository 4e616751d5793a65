//! Page windows and paginated result sets.
//!
//! [`generate_pagination_pages`] decides which page controls a pager renders:
//! the first and last page are always visible, the current page keeps its
//! neighbours, and everything else collapses behind ellipsis markers. The
//! output never exceeds 7 page numbers plus 2 ellipses, whatever the page count.

use serde::{Serialize, Serializer, ser::SerializeMap};

/// Page counts up to this value are rendered without any ellipsis.
const MAX_UNCOLLAPSED: u32 = 7;

/// Current pages up to this value use the "near the start" layout.
const LEADING_WINDOW: u32 = 4;

/// Width of the trailing block in the "near the end" layout, minus one.
const TRAILING_SPAN: u32 = 4;

/// A single control in a rendered page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// Clickable page number (1-based).
    Page(u32),
    /// Non-clickable placeholder for an elided run of page numbers.
    Ellipsis,
}

impl PageItem {
    /// Returns the page number, or `None` for an ellipsis.
    pub fn page(&self) -> Option<u32> {
        match self {
            PageItem::Page(n) => Some(*n),
            PageItem::Ellipsis => None,
        }
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self, PageItem::Ellipsis)
    }
}

/// Serializes as `{"page": n}` or `{"ellipsis": true}`.
impl Serialize for PageItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            PageItem::Page(n) => map.serialize_entry("page", n)?,
            PageItem::Ellipsis => map.serialize_entry("ellipsis", &true)?,
        }
        map.end()
    }
}

/// Computes the page controls to render for `current_page` of `total_pages`.
///
/// # Layouts
///
/// - `total_pages <= 7`: every page, no ellipsis
/// - current page `<= 4`: `1 2 3 4 5 … last`
/// - current page within the last four: `1 … last-4 … last`
/// - otherwise: `1 … current-1 current current+1 … last`
///
/// An ellipsis is only emitted when it hides at least two pages, so a window
/// never reads `1 … 3`.
///
/// `current_page` is clamped into `1..=total_pages`; `total_pages == 0`
/// yields an empty window.
///
/// # Examples
///
/// ```
/// use fleet_admin::domain::pagination::{PageItem::*, generate_pagination_pages};
///
/// assert_eq!(
///     generate_pagination_pages(5, 10),
///     vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
/// );
/// ```
pub fn generate_pagination_pages(current_page: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages == 0 {
        return Vec::new();
    }

    if total_pages <= MAX_UNCOLLAPSED {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let current = current_page.clamp(1, total_pages);
    let mut items = Vec::with_capacity(9);

    if current <= LEADING_WINDOW {
        items.extend((1..=LEADING_WINDOW + 1).map(PageItem::Page));
        if total_pages > LEADING_WINDOW + 2 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total_pages));
    } else if current >= total_pages - (TRAILING_SPAN - 1) {
        let tail_start = total_pages - TRAILING_SPAN;
        items.push(PageItem::Page(1));
        if tail_start > 2 {
            items.push(PageItem::Ellipsis);
        }
        items.extend((tail_start.max(2)..=total_pages).map(PageItem::Page));
    } else {
        items.push(PageItem::Page(1));
        match current - 1 {
            before if before > 2 => items.push(PageItem::Ellipsis),
            2 => items.push(PageItem::Page(2)),
            _ => {}
        }
        // The branch above already emitted page 2 when it is the left neighbour.
        let left = if current - 1 == 2 { current } else { current - 1 };
        items.extend((left..=current + 1).map(PageItem::Page));
        if current + 1 < total_pages - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total_pages));
    }

    items
}

/// A requested slice of a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Number of items preceding this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

/// One page of a listing together with the size of the whole result set.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Number of pages needed to show `total` items; `0` for an empty set.
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        let pages = self.total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Page controls for this page, see [`generate_pagination_pages`].
    pub fn window(&self) -> Vec<PageItem> {
        generate_pagination_pages(self.page, self.total_pages())
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
