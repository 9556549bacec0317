// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page metadata for a catalog that never reports its size.
//!
//! [`estimate_page`] infers `total`/`total_pages` from the shape of a single
//! page unless a known total is supplied. Its estimate only settles once a
//! boundary page (short or empty) has been seen, so `total_pages` may grow
//! or shrink between consecutive pages. [`exact_page`] is the search policy:
//! whatever came back is the whole result set.
//!
//! Both functions are total over their inputs.

use purrview_core::{PageRequest, PageResult, TotalSource};

/// Maximum number of links [`visible_pages`] emits before eliding.
pub const MAX_VISIBLE_PAGES: u32 = 7;

fn ceil_div(total: u64, limit: u32) -> u32 {
    let limit = u64::from(limit.max(1));
    u32::try_from(total.div_ceil(limit)).unwrap_or(u32::MAX)
}

/// Last listing page for a catalog of `total` items; never below 1.
pub(crate) fn last_page(total: u64, limit: u32) -> u32 {
    ceil_div(total, limit).max(1)
}

/// Builds listing metadata for `items`, the response to `request`.
///
/// In order of precedence:
/// 1. a known total is used as-is;
/// 2. an empty page means the previous page was the last one;
/// 3. a short page is the last page;
/// 4. a full page implies at least one more page.
pub fn estimate_page<T>(items: Vec<T>, request: PageRequest) -> PageResult<T> {
    let page = request.page.max(1);
    let limit = request.limit.max(1);
    let len = items.len() as u64;
    let before = u64::from(page - 1) * u64::from(limit);

    let (total, total_pages, source) = match request.known_total {
        Some(known) => (known, ceil_div(known, limit), TotalSource::Known),
        None if items.is_empty() => (before, (page - 1).max(1), TotalSource::Estimated),
        None if len < u64::from(limit) => (before + len, page, TotalSource::Estimated),
        None => (
            u64::from(page) * u64::from(limit) + len,
            page.saturating_add(1),
            TotalSource::Estimated,
        ),
    };

    PageResult {
        items,
        total,
        page: request.page,
        limit: request.limit,
        total_pages,
        source,
    }
}

/// Builds search metadata: the result count is the total.
pub fn exact_page<T>(items: Vec<T>, page: u32, limit: u32) -> PageResult<T> {
    let total = items.len() as u64;
    PageResult {
        total_pages: ceil_div(total, limit),
        items,
        total,
        page,
        limit,
        source: TotalSource::Exact,
    }
}

/// One entry of a pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(u32),
    /// Elided run of pages.
    Gap,
}

/// Links a pager shows for `current` out of `total_pages`.
///
/// Up to [`MAX_VISIBLE_PAGES`] pages are listed in full. Beyond that the
/// first and last pages are always shown, with a window that hugs the start,
/// the end, or `current`.
pub fn visible_pages(current: u32, total_pages: u32) -> Vec<PageLink> {
    if total_pages == 0 {
        return Vec::new();
    }
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageLink::Page).collect();
    }

    let current = current.clamp(1, total_pages);
    let mut links = Vec::with_capacity(MAX_VISIBLE_PAGES as usize);
    if current <= 4 {
        links.extend((1..=5).map(PageLink::Page));
        links.push(PageLink::Gap);
        links.push(PageLink::Page(total_pages));
    } else if current >= total_pages - 3 {
        links.push(PageLink::Page(1));
        links.push(PageLink::Gap);
        links.extend((total_pages - 4..=total_pages).map(PageLink::Page));
    } else {
        links.push(PageLink::Page(1));
        links.push(PageLink::Gap);
        links.extend((current - 1..=current + 1).map(PageLink::Page));
        links.push(PageLink::Gap);
        links.push(PageLink::Page(total_pages));
    }
    links
}
