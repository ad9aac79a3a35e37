//! Page state machine

use crate::state::FormId;
use std::fmt;
use thiserror::Error;

/// Top-level pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    List,
    Create,
    View(FormId),
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::List => "My Forms",
            Page::Create => "Create New Form",
            Page::View(_) => "View Form",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::List => f.write_str("List"),
            Page::Create => f.write_str("Create"),
            Page::View(id) => write!(f, "View({id})"),
        }
    }
}

/// User intents that move between pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    SelectList,
    SelectCreate,
    SelectView(FormId),
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Cannot navigate from {from} with {event:?}")]
    NotAllowed { from: Page, event: NavEvent },
}

/// Next page for `event`, or an error when the move is not allowed
pub fn transition(current: Page, event: NavEvent) -> Result<Page, NavigationError> {
    use NavEvent::*;
    match (current, event) {
        (Page::List, SelectList) => Ok(Page::List),
        (Page::List, SelectCreate) => Ok(Page::Create),
        (Page::List, SelectView(id)) => Ok(Page::View(id)),
        (Page::View(_), Back | SelectList) => Ok(Page::List),
        (Page::View(_), SelectCreate) => Ok(Page::Create),
        (Page::Create, Back | SelectList) => Ok(Page::List),
        (from, event) => Err(NavigationError::NotAllowed { from, event }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_page_is_list() {
        assert_eq!(Page::default(), Page::List);
    }

    #[test]
    fn test_page_titles() {
        assert_eq!(Page::List.title(), "My Forms");
        assert_eq!(Page::Create.title(), "Create New Form");
        assert_eq!(Page::View(7).title(), "View Form");
    }

    #[test]
    fn test_allowed_transitions() {
        let cases = [
            (Page::List, NavEvent::SelectCreate, Page::Create),
            (Page::List, NavEvent::SelectView(4), Page::View(4)),
            (Page::List, NavEvent::SelectList, Page::List),
            (Page::View(4), NavEvent::Back, Page::List),
            (Page::View(4), NavEvent::SelectList, Page::List),
            (Page::View(4), NavEvent::SelectCreate, Page::Create),
            (Page::Create, NavEvent::Back, Page::List),
            (Page::Create, NavEvent::SelectList, Page::List),
        ];
        for (from, event, to) in cases {
            assert_eq!(transition(from, event), Ok(to), "{from} {event:?}");
        }
    }

    #[test]
    fn test_view_only_reachable_from_list() {
        assert!(transition(Page::Create, NavEvent::SelectView(1)).is_err());
        assert!(transition(Page::View(1), NavEvent::SelectView(2)).is_err());
    }

    #[test]
    fn test_rejected_transitions() {
        assert_eq!(
            transition(Page::List, NavEvent::Back),
            Err(NavigationError::NotAllowed {
                from: Page::List,
                event: NavEvent::Back
            })
        );
        assert!(transition(Page::Create, NavEvent::SelectCreate).is_err());
    }
}
