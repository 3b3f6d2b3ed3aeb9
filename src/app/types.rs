//! Type definitions for the application state.
//!
//! Contains enums used for tracking UI state:
//! - [`Screen`] - Which screen is currently displayed
//! - [`Focus`] - Which dashboard component has keyboard focus
//! - [`LoginField`] - Which login form field is being edited

/// Represents which screen is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Dashboard,
}

/// Represents which dashboard component has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Table,
    Search,
}

/// Represents which login form field is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Sidebar navigation entries, matching the web admin's menu. Only
/// Dashboard has a screen behind it; the rest render as inactive items.
pub const NAV_ITEMS: &[&str] = &[
    "Dashboard",
    "User Management",
    "Consult. & Presp.",
    "Pharm. & Orders Mgt.",
    "Payments",
    "Settings",
    "Roles & Permissions",
    "Activity Log",
    "Blog / Health Tips",
    "Notifications Mgt.",
    "Website Updates",
];
