//! Navigation affordances derived from session state.
//!
//! Purely derived; no owned state.

use crate::session::SessionSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Home,
    Dashboard,
    Profile,
    Login,
    Register,
    Logout,
}

/// A single navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub target: NavTarget,
}

const fn link(label: &'static str, target: NavTarget) -> NavLink {
    NavLink { label, target }
}

/// Render the navigation links for the current session.
pub fn render(session: &SessionSnapshot) -> Vec<NavLink> {
    if session.logged_in {
        vec![
            link("Dashboard", NavTarget::Dashboard),
            link("Profile", NavTarget::Profile),
            link("Logout", NavTarget::Logout),
        ]
    } else {
        vec![
            link("Dashboard", NavTarget::Dashboard),
            link("Login", NavTarget::Login),
            link("Register", NavTarget::Register),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_out_session_gets_auth_links() {
        let links = render(&SessionSnapshot::logged_out());
        let targets: Vec<NavTarget> = links.iter().map(|l| l.target).collect();
        assert_eq!(
            targets,
            vec![NavTarget::Dashboard, NavTarget::Login, NavTarget::Register]
        );
    }

    #[test]
    fn logged_in_session_gets_profile_and_logout() {
        let session = SessionSnapshot {
            logged_in: true,
            ..SessionSnapshot::default()
        };
        let targets: Vec<NavTarget> = render(&session).iter().map(|l| l.target).collect();
        assert_eq!(
            targets,
            vec![NavTarget::Dashboard, NavTarget::Profile, NavTarget::Logout]
        );
    }
}
