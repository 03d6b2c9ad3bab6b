//! Role-filtered navigation entries and dashboard widgets.
//!
//! Presentation only: hiding an entry does not protect its route. Every
//! section route is guarded the same way regardless of role.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use session::{DASHBOARD_PATH, Role};

/// One entry in the side navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
}

pub const DASHBOARD: NavItem = NavItem { path: DASHBOARD_PATH, label: "Dashboard" };
pub const PATIENTS: NavItem = NavItem { path: "/patients", label: "Patients" };
pub const EMPLOYEES: NavItem = NavItem { path: "/employees", label: "Employees" };
pub const TOOLS: NavItem = NavItem { path: "/tools", label: "Therapy Tools" };
pub const SCHEDULE: NavItem = NavItem { path: "/schedule", label: "Schedule" };
pub const REPORTS: NavItem = NavItem { path: "/reports", label: "Progress Reports" };
pub const SESSIONS: NavItem = NavItem { path: "/sessions", label: "Video Sessions" };

/// Navigation entries shown to `role`, in menu order.
pub fn nav_items(role: Role) -> Vec<NavItem> {
    match role {
        Role::Therapist => vec![DASHBOARD, PATIENTS, TOOLS, SCHEDULE, REPORTS, SESSIONS],
        Role::Caregiver => vec![DASHBOARD, TOOLS, SCHEDULE, REPORTS, SESSIONS],
        Role::Teacher => vec![DASHBOARD, PATIENTS, TOOLS, SCHEDULE, REPORTS],
        Role::Hr => vec![DASHBOARD, EMPLOYEES, SCHEDULE, REPORTS],
        Role::Admin => vec![DASHBOARD, PATIENTS, EMPLOYEES, TOOLS, SCHEDULE, REPORTS, SESSIONS],
    }
}

/// Dashboard widget titles for `role`.
pub fn dashboard_widgets(role: Role) -> &'static [&'static str] {
    match role {
        Role::Therapist => &["Today's Sessions", "Active Patients", "Pending Reports"],
        Role::Caregiver => &["Upcoming Appointments", "Daily Routine", "Progress Highlights"],
        Role::Teacher => &["Classroom Supports", "Student Goals", "Parent Messages"],
        Role::Hr => &["Open Positions", "Staff Certifications", "Onboarding"],
        Role::Admin => &["Active Users", "System Activity", "Role Breakdown"],
    }
}
