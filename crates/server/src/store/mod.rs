//! In-memory store owning the User → Project → Badge hierarchy.
//!
//! # Locking
//!
//! The user map sits behind one `RwLock` that is only write-locked to insert
//! a new user. Each user then has their own `RwLock`, so mutations are
//! serialized per user while unrelated users never contend. Every mutation
//! runs to completion under the user's write lock; readers clone a snapshot
//! under the read lock and therefore never see a half-applied change (an
//! unsorted project list, a badge without its final ID).
//!
//! # Absence
//!
//! Nothing here returns an error. Lookups of missing users, projects or
//! badges yield `None`, deletes of missing entities are no-ops reported as
//! `false`, and writes to missing entities do nothing.

mod seed;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use maintained_core::{Badge, BadgeAppearance, BadgeId, Project, User};

/// Requested edit to a badge's text.
///
/// Each half applies only when its text is present and non-empty. Text is
/// expected percent-encoded and is decoded once before it is stored. A
/// missing width keeps the stored width for that half.
#[derive(Debug, Clone, Default)]
pub struct BadgeUpdate {
    pub title: Option<String>,
    pub title_width: Option<f64>,
    pub value: Option<String>,
    pub value_width: Option<f64>,
}

/// Shared handle to the badge store. Cheap to clone.
#[derive(Clone)]
pub struct ProjectStore {
    inner: Arc<ProjectStoreInner>,
}

struct ProjectStoreInner {
    /// Value text of every starter badge
    product_name: String,
    users: RwLock<HashMap<String, Arc<RwLock<User>>>>,
}

impl ProjectStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ProjectStoreInner {
                product_name: product_name.into(),
                users: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Look up the lock guarding one user, releasing the map lock right away.
    async fn user_handle(&self, id: &str) -> Option<Arc<RwLock<User>>> {
        self.inner.users.read().await.get(id).cloned()
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Create the user on first contact; a no-op if they already exist.
    ///
    /// A new user gets one project titled after their ID, holding the
    /// starter badge. Returns `true` when the user was created.
    #[instrument(skip(self))]
    pub async fn ensure_user(&self, id: &str) -> bool {
        if self.inner.users.read().await.contains_key(id) {
            return false;
        }

        match self.inner.users.write().await.entry(id.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                let user = seed::starter_user(id, &self.inner.product_name);
                slot.insert(Arc::new(RwLock::new(user)));
                info!(user = %id, "Created user with starter project");
                true
            }
        }
    }

    /// Snapshot of a user and everything they own.
    pub async fn get_user(&self, id: &str) -> Option<User> {
        let handle = self.user_handle(id).await?;
        let user = handle.read().await;
        Some(user.clone())
    }

    /// Mark onboarding as done. Returns `false` if the user does not exist.
    #[instrument(skip(self))]
    pub async fn clear_first_visit(&self, id: &str) -> bool {
        let Some(handle) = self.user_handle(id).await else {
            debug!(user = %id, "Cannot clear first visit of unknown user");
            return false;
        };
        handle.write().await.first_visit = false;
        true
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// Create a project seeded with one badge.
    ///
    /// Returns `None` if the user does not exist, the title is empty, or the
    /// user already has a project with this title. On success the user's
    /// projects are re-sorted by title.
    #[instrument(skip(self))]
    pub async fn create_project(&self, user_id: &str, title: &str) -> Option<Project> {
        if title.is_empty() {
            return None;
        }

        let handle = self.user_handle(user_id).await?;
        let mut user = handle.write().await;

        if user.project(title).is_some() {
            debug!(user = %user_id, project = %title, "Project title already taken");
            return None;
        }

        let project = Project::new(title, seed::created_badge());
        user.projects.push(project.clone());
        user.projects
            .sort_by(|a, b| compare_titles(&a.title, &b.title));

        info!(user = %user_id, project = %title, "Created project");
        Some(project)
    }

    /// Delete a project and all of its badges.
    ///
    /// Returns `false` when there was nothing to delete.
    #[instrument(skip(self))]
    pub async fn delete_project(&self, user_id: &str, title: &str) -> bool {
        let Some(handle) = self.user_handle(user_id).await else {
            return false;
        };
        let mut user = handle.write().await;

        let Some(index) = user.projects.iter().position(|p| p.title == title) else {
            return false;
        };
        user.projects.remove(index);

        info!(user = %user_id, project = %title, "Deleted project");
        true
    }

    // =========================================================================
    // Badges
    // =========================================================================

    /// Append a blank badge to a project.
    ///
    /// The new ID is one past the ID of the project's last badge (see
    /// [`Project::next_badge_id`]). Returns `None` if the project is missing.
    #[instrument(skip(self))]
    pub async fn create_badge(&self, user_id: &str, project_title: &str) -> Option<Badge> {
        let handle = self.user_handle(user_id).await?;
        let mut user = handle.write().await;
        let project = user.project_mut(project_title)?;

        let badge = seed::new_badge(project.next_badge_id());
        project.badges.push(badge.clone());

        info!(user = %user_id, project = %project_title, badge_id = %badge.id, "Created badge");
        Some(badge)
    }

    /// Delete a badge. Returns `false` when the project or badge is missing.
    #[instrument(skip(self))]
    pub async fn delete_badge(&self, user_id: &str, project_title: &str, id: BadgeId) -> bool {
        let Some(handle) = self.user_handle(user_id).await else {
            return false;
        };
        let mut user = handle.write().await;
        let Some(project) = user.project_mut(project_title) else {
            return false;
        };

        let Some(index) = project.badges.iter().position(|b| b.id == id) else {
            return false;
        };
        project.badges.remove(index);

        info!(user = %user_id, project = %project_title, badge_id = %id, "Deleted badge");
        true
    }

    /// Snapshot of one badge.
    pub async fn get_badge(&self, user_id: &str, project_title: &str, id: BadgeId) -> Option<Badge> {
        let handle = self.user_handle(user_id).await?;
        let user = handle.read().await;
        user.project(project_title)?.badge(id).cloned()
    }

    /// Edit a badge's title and/or value text.
    ///
    /// Returns the updated badge, or `None` if the project or badge is
    /// missing.
    #[instrument(skip(self))]
    pub async fn update_badge(
        &self,
        user_id: &str,
        project_title: &str,
        id: BadgeId,
        update: BadgeUpdate,
    ) -> Option<Badge> {
        let handle = self.user_handle(user_id).await?;
        let mut user = handle.write().await;
        let badge = user.project_mut(project_title)?.badge_mut(id)?;

        if let Some(title) = update.title.as_deref().filter(|t| !t.is_empty()) {
            badge.title = percent_decode(title);
            if let Some(width) = update.title_width {
                badge.title_width = width;
            }
        }
        if let Some(value) = update.value.as_deref().filter(|v| !v.is_empty()) {
            badge.value = percent_decode(value);
            if let Some(width) = update.value_width {
                badge.value_width = width;
            }
        }

        debug!(user = %user_id, project = %project_title, badge_id = %id, "Updated badge text");
        Some(badge.clone())
    }

    /// Replace a badge's colors, style, live value source and mono flag.
    ///
    /// Returns the updated badge, or `None` if the project or badge is
    /// missing.
    #[instrument(skip(self))]
    pub async fn configure_badge(
        &self,
        user_id: &str,
        project_title: &str,
        id: BadgeId,
        appearance: BadgeAppearance,
    ) -> Option<Badge> {
        let handle = self.user_handle(user_id).await?;
        let mut user = handle.write().await;
        let badge = user.project_mut(project_title)?.badge_mut(id)?;

        badge.apply_appearance(appearance);

        debug!(user = %user_id, project = %project_title, badge_id = %id, "Configured badge");
        Some(badge.clone())
    }
}

/// Order project titles the way a human-facing list expects: ignoring
/// accents and case first, then unaccented ahead of accented, then lowercase
/// ahead of uppercase.
fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Lowercased text with combining marks stripped after decomposition.
fn collation_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Decode percent-encoded client text. Input that does not decode to UTF-8
/// is kept verbatim.
pub fn percent_decode(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), Cow::into_owned)
}
