//! Default entities the store creates on the caller's behalf.

use maintained_core::{Badge, BadgeId, Project, User};

/// The badge every new user finds in their first project.
pub fn starter_badge(product_name: &str) -> Badge {
    Badge::new(BadgeId::new(0), "Welcome to", 90.0, product_name, 90.0)
}

/// The badge seeded into an explicitly created project.
pub fn created_badge() -> Badge {
    Badge::new(BadgeId::new(0), "Created", 50.0, "Successfully", 90.0)
}

/// A blank badge appended by `create_badge`.
pub fn new_badge(id: BadgeId) -> Badge {
    Badge::new(id, "New", 30.0, "Badge", 50.0)
}

/// A first-contact user: one project named after them holding the starter badge.
pub fn starter_user(id: &str, product_name: &str) -> User {
    User {
        id: id.to_string(),
        display_name: id.to_string(),
        first_visit: true,
        projects: vec![Project::new(id, starter_badge(product_name))],
    }
}
