use serde::{Deserialize, Serialize};

use crate::view_state::ViewAction;

/// Page sections in document order, top to bottom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    #[default]
    Home,
    Projects,
    Skills,
    Education,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        Self::Home,
        Self::Projects,
        Self::Skills,
        Self::Education,
        Self::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Education => "education",
            Self::Contact => "contact",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationItem {
    pub id: SectionId,
    pub label: &'static str,
}

pub const NAV_ITEMS: [NavigationItem; 5] = [
    NavigationItem {
        id: SectionId::Home,
        label: "Home",
    },
    NavigationItem {
        id: SectionId::Projects,
        label: "Projects",
    },
    NavigationItem {
        id: SectionId::Skills,
        label: "Skills",
    },
    NavigationItem {
        id: SectionId::Education,
        label: "Education",
    },
    NavigationItem {
        id: SectionId::Contact,
        label: "Contact",
    },
];

/// Whatever can bring a section into view.
pub trait SectionTargets {
    /// Starts a smooth scroll to `id`. Returns `false` when the section is not mounted.
    fn scroll_to(&self, id: SectionId) -> bool;
}

/// Scrolls to `id` and returns the optimistic state update, or `None` when the
/// target is missing.
pub fn navigate<T>(targets: &T, id: SectionId) -> Option<ViewAction>
where
    T: SectionTargets + ?Sized,
{
    targets.scroll_to(id).then_some(ViewAction::Navigate(id))
}
