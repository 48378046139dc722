use serde::{Deserialize, Serialize};

/// One item of a pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageToken {
    /// Jump to page 1
    First { target: usize, disabled: bool },
    /// Step back one page
    Previous { target: usize, disabled: bool },
    /// A concrete page number
    Page { number: usize, current: bool },
    /// Collapsed run of pages
    Ellipsis,
    /// Step forward one page
    Next { target: usize, disabled: bool },
    /// Jump to the last page
    Last { target: usize, disabled: bool },
}

/// Discriminant of a [`PageToken`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Page,
    Ellipsis,
    First,
    Previous,
    Next,
    Last,
}

impl PageToken {
    pub fn kind(&self) -> TokenKind {
        match self {
            PageToken::First { .. } => TokenKind::First,
            PageToken::Previous { .. } => TokenKind::Previous,
            PageToken::Page { .. } => TokenKind::Page,
            PageToken::Ellipsis => TokenKind::Ellipsis,
            PageToken::Next { .. } => TokenKind::Next,
            PageToken::Last { .. } => TokenKind::Last,
        }
    }

    /// Page a click on this token navigates to. Ellipses have none.
    pub fn target(&self) -> Option<usize> {
        match *self {
            PageToken::First { target, .. }
            | PageToken::Previous { target, .. }
            | PageToken::Next { target, .. }
            | PageToken::Last { target, .. } => Some(target),
            PageToken::Page { number, .. } => Some(number),
            PageToken::Ellipsis => None,
        }
    }

    /// Only edge controls can be disabled
    pub fn is_disabled(&self) -> bool {
        match *self {
            PageToken::First { disabled, .. }
            | PageToken::Previous { disabled, .. }
            | PageToken::Next { disabled, .. }
            | PageToken::Last { disabled, .. } => disabled,
            PageToken::Page { .. } | PageToken::Ellipsis => false,
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, PageToken::Page { current: true, .. })
    }

    pub fn is_page(&self) -> bool {
        matches!(self, PageToken::Page { .. })
    }
}
