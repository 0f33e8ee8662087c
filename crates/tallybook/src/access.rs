use std::fmt;

use crate::UserRole;

/// The pages of the application. Each CLI command maps to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Products,
    Stock,
    Estimates,
    Invoices,
    Reports,
    Users,
    Settings,
}

/// Menu order and role gates, one row per page.
const NAV_TABLE: [(Page, &[UserRole]); 8] = [
    (
        Page::Dashboard,
        &[
            UserRole::Admin,
            UserRole::Executive,
            UserRole::StoreManager,
            UserRole::TeamLeader,
        ],
    ),
    (
        Page::Products,
        &[UserRole::Admin, UserRole::Executive, UserRole::StoreManager],
    ),
    (
        Page::Stock,
        &[UserRole::Admin, UserRole::Executive, UserRole::StoreManager],
    ),
    (Page::Estimates, &[UserRole::Admin, UserRole::Executive]),
    (Page::Invoices, &[UserRole::Admin, UserRole::Executive]),
    (
        Page::Reports,
        &[UserRole::Admin, UserRole::Executive, UserRole::TeamLeader],
    ),
    (Page::Users, &[UserRole::Admin]),
    (Page::Settings, &[UserRole::Admin]),
];

impl Page {
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Products => "Products",
            Self::Stock => "Stock",
            Self::Estimates => "Estimates",
            Self::Invoices => "Invoices",
            Self::Reports => "Reports",
            Self::Users => "Users",
            Self::Settings => "Settings",
        }
    }

    pub fn allowed_for(self, role: UserRole) -> bool {
        NAV_TABLE
            .iter()
            .find(|(page, _)| *page == self)
            .is_some_and(|(_, roles)| roles.contains(&role))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pages visible to a role, in menu order.
pub fn pages_for(role: UserRole) -> Vec<Page> {
    NAV_TABLE
        .iter()
        .filter(|(_, roles)| roles.contains(&role))
        .map(|(page, _)| *page)
        .collect()
}
