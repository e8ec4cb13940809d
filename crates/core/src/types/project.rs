//! Projects and the users that own them.

use serde::{Deserialize, Serialize};

use super::badge::Badge;
use super::id::BadgeId;

/// A named group of badges. The title is the project's key within its user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub badges: Vec<Badge>,
}

impl Project {
    /// Create a project holding a single badge.
    #[must_use]
    pub fn new(title: impl Into<String>, first_badge: Badge) -> Self {
        Self {
            title: title.into(),
            badges: vec![first_badge],
        }
    }

    /// Find a badge by ID.
    #[must_use]
    pub fn badge(&self, id: BadgeId) -> Option<&Badge> {
        self.badges.iter().find(|b| b.id == id)
    }

    /// Find a badge by ID for modification.
    pub fn badge_mut(&mut self, id: BadgeId) -> Option<&mut Badge> {
        self.badges.iter_mut().find(|b| b.id == id)
    }

    /// The ID the next appended badge receives: one past the *last* badge's
    /// ID, or 1 when the project is empty.
    ///
    /// This is not a maximum scan. If the last badge is not the one with the
    /// highest ID, the result can repeat an ID still held by an earlier badge.
    #[must_use]
    pub fn next_badge_id(&self) -> BadgeId {
        self.badges
            .last()
            .map_or(BadgeId::new(0), |last| last.id)
            .successor()
    }
}

/// A badge owner and their projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque identity key supplied by the identity provider.
    pub id: String,
    pub display_name: String,
    /// True until onboarding has been acknowledged.
    pub first_visit: bool,
    pub projects: Vec<Project>,
}

impl User {
    /// Find a project by title.
    #[must_use]
    pub fn project(&self, title: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.title == title)
    }

    /// Find a project by title for modification.
    pub fn project_mut(&mut self, title: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.title == title)
    }
}
