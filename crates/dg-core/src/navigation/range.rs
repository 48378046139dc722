//! Page-range computation for pagination controls

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::PageToken;

/// Inputs of [`compute_range`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeOptions {
    /// Current page, 1-based
    pub page: usize,
    pub page_count: usize,
    /// Pages shown on each side of the current page
    pub sibling_count: usize,
    /// Pages always shown at each end
    pub boundary_count: usize,
    pub show_first_last: bool,
    pub show_prev_next: bool,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            page: 1,
            page_count: 1,
            sibling_count: 1,
            boundary_count: 1,
            show_first_last: true,
            show_prev_next: true,
        }
    }
}

impl RangeOptions {
    pub fn new(page: usize, page_count: usize) -> Self {
        Self {
            page,
            page_count,
            ..Self::default()
        }
    }

    pub fn with_siblings(mut self, sibling_count: usize) -> Self {
        self.sibling_count = sibling_count;
        self
    }

    pub fn with_boundaries(mut self, boundary_count: usize) -> Self {
        self.boundary_count = boundary_count;
        self
    }

    pub fn first_last(mut self, show: bool) -> Self {
        self.show_first_last = show;
        self
    }

    pub fn prev_next(mut self, show: bool) -> Self {
        self.show_prev_next = show;
        self
    }
}

/// Lay out the tokens of a pagination control.
///
/// The page list is the union of the boundary ranges and the sibling window
/// around the current page. Between two consecutive listed pages a gap of
/// exactly one page is filled with that page; wider gaps collapse into a
/// single ellipsis. Out-of-range inputs are clamped, so the result is always
/// renderable and contains exactly one current page.
pub fn compute_range(options: &RangeOptions) -> Vec<PageToken> {
    let count = options.page_count.max(1);
    let page = options.page.clamp(1, count);
    let boundary = options.boundary_count;
    let sibling = options.sibling_count;

    let mut pages = BTreeSet::new();
    pages.extend(1..=boundary.min(count));
    pages.extend(count.saturating_sub(boundary).saturating_add(1)..=count);

    let window_start = page.saturating_sub(sibling).max(boundary.saturating_add(1));
    let window_end = page.saturating_add(sibling).min(count.saturating_sub(boundary));
    pages.extend(window_start..=window_end);

    let mut tokens = Vec::with_capacity(pages.len() + 6);

    if options.show_first_last {
        tokens.push(PageToken::First {
            target: 1,
            disabled: page == 1,
        });
    }
    if options.show_prev_next {
        tokens.push(PageToken::Previous {
            target: page.saturating_sub(1).max(1),
            disabled: page == 1,
        });
    }

    // 0 and count + 1 stand in for the edges when a boundary range is empty
    let mut last = 0;
    for number in pages {
        push_gap(&mut tokens, last, number);
        tokens.push(PageToken::Page {
            number,
            current: number == page,
        });
        last = number;
    }
    push_gap(&mut tokens, last, count.saturating_add(1));

    if options.show_prev_next {
        tokens.push(PageToken::Next {
            target: page.saturating_add(1).min(count),
            disabled: page == count,
        });
    }
    if options.show_first_last {
        tokens.push(PageToken::Last {
            target: count,
            disabled: page == count,
        });
    }

    tracing::trace!(
        "Computed {} pagination tokens for page {}/{}",
        tokens.len(),
        page,
        count
    );

    tokens
}

fn push_gap(tokens: &mut Vec<PageToken>, from: usize, to: usize) {
    match to - from {
        0 | 1 => {}
        2 => tokens.push(PageToken::Page {
            number: from + 1,
            current: false,
        }),
        _ => tokens.push(PageToken::Ellipsis),
    }
}
