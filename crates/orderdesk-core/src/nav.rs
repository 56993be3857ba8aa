//! Sidebar navigation model.
//!
//! Entries are either a leaf link or a collapsible group of children.
//! Active-route detection takes the current path as an explicit argument:
//! `None` means there is no route context and nothing is active.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NavItem {
    Leaf {
        label: String,
        icon: String,
        target: String,
    },
    Group {
        label: String,
        icon: String,
        children: Vec<NavItem>,
    },
}

impl NavItem {
    #[must_use]
    pub fn leaf(label: &str, icon: &str, target: &str) -> Self {
        Self::Leaf {
            label: label.to_string(),
            icon: icon.to_string(),
            target: target.to_string(),
        }
    }

    #[must_use]
    pub fn group(label: &str, icon: &str, children: Vec<Self>) -> Self {
        Self::Group {
            label: label.to_string(),
            icon: icon.to_string(),
            children,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf { label, .. } | Self::Group { label, .. } => label,
        }
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        match self {
            Self::Leaf { icon, .. } | Self::Group { icon, .. } => icon,
        }
    }

    /// A leaf is active when its target equals the current path; a group is
    /// active when any descendant is.
    #[must_use]
    pub fn is_active(&self, current: Option<&str>) -> bool {
        let Some(path) = current else {
            return false;
        };
        match self {
            Self::Leaf { target, .. } => target == path,
            Self::Group { children, .. } => children.iter().any(|c| c.is_active(current)),
        }
    }

    /// Labels from this item down to the leaf targeting `path`.
    #[must_use]
    pub fn trail_to(&self, path: &str) -> Option<Vec<String>> {
        match self {
            Self::Leaf { label, target, .. } => (target == path).then(|| vec![label.clone()]),
            Self::Group {
                label, children, ..
            } => children.iter().find_map(|child| {
                child.trail_to(path).map(|mut trail| {
                    trail.insert(0, label.clone());
                    trail
                })
            }),
        }
    }
}

/// A titled block of sidebar entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSection {
    pub title: String,
    pub items: Vec<NavItem>,
}

/// The dashboard sidebar: "Dashboards" then "Pages".
#[must_use]
pub fn sidebar() -> Vec<NavSection> {
    vec![
        NavSection {
            title: "Dashboards".to_string(),
            items: vec![
                NavItem::leaf("Default", "home", "/"),
                NavItem::leaf("eCommerce", "shopping-bag", "/orders"),
                NavItem::leaf("Projects", "briefcase", "/projects"),
                NavItem::leaf("Online Courses", "book-open", "/courses"),
            ],
        },
        NavSection {
            title: "Pages".to_string(),
            items: vec![
                NavItem::group(
                    "User Profile",
                    "user",
                    vec![
                        NavItem::leaf("Overview", "file-text", "/profile/overview"),
                        NavItem::leaf("Projects", "folder", "/profile/projects"),
                        NavItem::leaf("Campaigns", "layers", "/profile/campaigns"),
                        NavItem::leaf("Documents", "file", "/profile/documents"),
                        NavItem::leaf("Followers", "users", "/profile/followers"),
                    ],
                ),
                NavItem::leaf("Account", "user-check", "/account"),
                NavItem::leaf("Corporate", "user-2", "/corporate"),
                NavItem::leaf("Blog", "pen-square", "/blog"),
                NavItem::leaf("Social", "message-square", "/social"),
            ],
        },
    ]
}

/// Breadcrumb for `path`: section title followed by item labels.
#[must_use]
pub fn breadcrumb(sections: &[NavSection], path: &str) -> Option<Vec<String>> {
    sections.iter().find_map(|section| {
        section.items.iter().find_map(|item| {
            item.trail_to(path).map(|mut trail| {
                trail.insert(0, section.title.clone());
                trail
            })
        })
    })
}

/// Heading for a page without its own screen: the last path segment with
/// dashes as spaces and each word capitalized. The root is "Home".
#[must_use]
pub fn page_title(path: &str) -> String {
    let raw = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .unwrap_or("Home");
    raw.replace('-', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
