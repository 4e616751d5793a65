//! Page controls for server-rendered tables.

use url::form_urlencoded;

use crate::domain::pagination::{Page, PageItem};

/// One entry of the page control row.
///
/// `href` is `None` for the current page and for gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerLink {
    pub label: String,
    pub href: Option<String>,
    pub current: bool,
}

/// Page window rendered as links that keep the active filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    pub links: Vec<PagerLink>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub summary: String,
}

impl Pager {
    /// Builds the controls for `page`, linking to `base` with `params`
    /// (blank values are dropped) plus the page number.
    ///
    /// ```rust,ignore
    /// let pager = Pager::new(&page, "/dashboard/drivers", &[("search", search)]);
    /// // pager.links[1].href == Some("/dashboard/drivers?search=ali&page=2")
    /// ```
    pub fn new<T>(page: &Page<T>, base: &str, params: &[(&str, String)]) -> Self {
        let total_pages = page.total_pages();
        let current = page.page.clamp(1, total_pages.max(1));

        let links = page
            .window()
            .into_iter()
            .map(|item| match item {
                PageItem::Page(n) => PagerLink {
                    label: n.to_string(),
                    href: (n != current).then(|| page_href(base, params, n)),
                    current: n == current,
                },
                PageItem::Ellipsis => PagerLink {
                    label: "…".to_string(),
                    href: None,
                    current: false,
                },
            })
            .collect();

        let prev = (current > 1).then(|| page_href(base, params, current - 1));
        let next = (current < total_pages).then(|| page_href(base, params, current + 1));

        Self {
            links,
            prev,
            next,
            summary: summary(page, current),
        }
    }

    /// Whether there is more than one page to navigate.
    pub fn is_visible(&self) -> bool {
        self.links.len() > 1
    }
}

fn page_href(base: &str, params: &[(&str, String)], page: u32) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        if !value.trim().is_empty() {
            query.append_pair(key, value.trim());
        }
    }
    query.append_pair("page", &page.to_string());
    format!("{}?{}", base, query.finish())
}

fn summary<T>(page: &Page<T>, current: u32) -> String {
    if page.total == 0 {
        return "No results".to_string();
    }
    if page.items.is_empty() {
        return format!("No results on this page ({} in total)", page.total);
    }
    let first = u64::from(current - 1) * u64::from(page.page_size) + 1;
    let last = (first + page.items.len() as u64).saturating_sub(1).max(first);
    format!("Showing {}-{} of {}", first, last.min(page.total), page.total)
}
