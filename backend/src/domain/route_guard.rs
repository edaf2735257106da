//! Route guard: maps the session and a view's access requirement onto a
//! render, redirect or defer decision.
//!
//! The guard reads a [`Session`] but never mutates it. Roles are recorded on
//! the identity but no view is restricted by role.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::Session;

/// Location unauthenticated visitors are sent to.
pub const LOGIN_PATH: &str = "/login";

/// Access requirement attached to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    /// Anyone may view.
    Public,
    /// A signed-in identity is required.
    Authenticated,
}

/// Outcome of evaluating a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum RouteDecision {
    /// Show the requested view.
    Render,
    /// Send the visitor to [`LOGIN_PATH`].
    RedirectToLogin,
    /// Wait: the session is still restoring and may yet hold an identity.
    Defer,
}

/// Screens the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum View {
    /// Landing page.
    Home,
    /// Practice information.
    About,
    /// Sign-in form.
    Login,
    /// Registration form.
    Register,
    /// Practitioner overview.
    Dashboard,
    /// Practitioner's own profile.
    DoctorProfile,
    /// Single patient record.
    PatientDetail,
    /// Before/after case studies.
    CaseGallery,
}

/// A view together with its path pattern and access requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewDescriptor {
    /// Screen identifier.
    pub view: View,
    /// Path pattern; segments starting with `:` capture a parameter.
    pub pattern: &'static str,
    /// Who may see it.
    pub access: Access,
}

const VIEWS: [ViewDescriptor; 8] = [
    ViewDescriptor { view: View::Home, pattern: "/", access: Access::Public },
    ViewDescriptor { view: View::About, pattern: "/about", access: Access::Public },
    ViewDescriptor { view: View::Login, pattern: "/login", access: Access::Public },
    ViewDescriptor { view: View::Register, pattern: "/register", access: Access::Public },
    ViewDescriptor { view: View::Dashboard, pattern: "/dashboard", access: Access::Authenticated },
    ViewDescriptor {
        view: View::DoctorProfile,
        pattern: "/doctor-profile",
        access: Access::Authenticated,
    },
    ViewDescriptor {
        view: View::PatientDetail,
        pattern: "/patients/:patientId",
        access: Access::Authenticated,
    },
    ViewDescriptor {
        view: View::CaseGallery,
        pattern: "/case-gallery",
        access: Access::Authenticated,
    },
];

/// A concrete path matched against the view table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedView {
    /// Matching descriptor.
    pub descriptor: ViewDescriptor,
    /// Captured `:name` parameters.
    pub params: BTreeMap<String, String>,
}

/// Decision function over the application's view table.
#[derive(Debug, Clone, Copy)]
pub struct RouteGuard {
    views: &'static [ViewDescriptor],
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self { views: &VIEWS }
    }
}

impl RouteGuard {
    /// The registered views in declaration order.
    #[must_use]
    pub fn views(&self) -> &'static [ViewDescriptor] {
        self.views
    }

    /// Descriptor for a known view.
    #[must_use]
    pub fn descriptor(&self, view: View) -> Option<ViewDescriptor> {
        self.views.iter().copied().find(|d| d.view == view)
    }

    /// Decide whether `session` may see a view requiring `access`.
    ///
    /// # Examples
    /// ```
    /// use careandcure::domain::{Access, RouteDecision, RouteGuard, Session};
    ///
    /// let guard = RouteGuard::default();
    /// let restoring = Session::new(None, true);
    /// assert_eq!(guard.decide(&restoring, Access::Authenticated), RouteDecision::Defer);
    /// assert_eq!(guard.decide(&restoring, Access::Public), RouteDecision::Render);
    /// ```
    #[must_use]
    pub fn decide(&self, session: &Session, access: Access) -> RouteDecision {
        match access {
            Access::Public => RouteDecision::Render,
            Access::Authenticated if session.is_authenticated() => RouteDecision::Render,
            Access::Authenticated if session.is_pending() => RouteDecision::Defer,
            Access::Authenticated => RouteDecision::RedirectToLogin,
        }
    }

    /// Match a concrete path such as `/patients/3` against the view table.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<ResolvedView> {
        let segments = split(path);
        self.views.iter().find_map(|descriptor| {
            match_pattern(descriptor.pattern, &segments).map(|params| ResolvedView {
                descriptor: *descriptor,
                params,
            })
        })
    }
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

fn match_pattern(pattern: &str, segments: &[&str]) -> Option<BTreeMap<String, String>> {
    let expected = split(pattern);
    if expected.len() != segments.len() {
        return None;
    }
    let mut params = BTreeMap::new();
    for (want, got) in expected.iter().zip(segments) {
        match want.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_owned(), (*got).to_owned());
            }
            None if want == got => {}
            None => return None,
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the guard decision table.
    use super::*;
    use crate::domain::{DisplayName, EmailAddress, Identity, IdentityId, Role};
    use rstest::rstest;

    fn identity(role: Role) -> Identity {
        Identity::new(
            IdentityId::new("1").expect("id"),
            DisplayName::new("Dr. John Doe").expect("name"),
            EmailAddress::new("a@b.com").expect("email"),
            role,
        )
    }

    #[rstest]
    #[case(Session::new(None, false), RouteDecision::RedirectToLogin)]
    #[case(Session::new(None, true), RouteDecision::Defer)]
    #[case(Session::new(Some(identity(Role::Practitioner)), false), RouteDecision::Render)]
    #[case(Session::new(Some(identity(Role::Administrator)), false), RouteDecision::Render)]
    #[case(Session::new(Some(identity(Role::Practitioner)), true), RouteDecision::Render)]
    fn authenticated_views(#[case] session: Session, #[case] expected: RouteDecision) {
        let guard = RouteGuard::default();
        assert_eq!(guard.decide(&session, Access::Authenticated), expected);
    }

    #[rstest]
    #[case(Session::new(None, false))]
    #[case(Session::new(None, true))]
    #[case(Session::new(Some(identity(Role::Practitioner)), false))]
    fn public_views_always_render(#[case] session: Session) {
        let guard = RouteGuard::default();
        assert_eq!(guard.decide(&session, Access::Public), RouteDecision::Render);
    }

    #[test]
    fn every_protected_view_redirects_when_signed_out() {
        let guard = RouteGuard::default();
        let signed_out = Session::new(None, false);
        for descriptor in guard.views() {
            let decision = guard.decide(&signed_out, descriptor.access);
            match descriptor.access {
                Access::Authenticated => assert_eq!(decision, RouteDecision::RedirectToLogin),
                Access::Public => assert_eq!(decision, RouteDecision::Render),
            }
        }
    }

    #[rstest]
    #[case("/", View::Home)]
    #[case("/about", View::About)]
    #[case("/about/", View::About)]
    #[case("/dashboard", View::Dashboard)]
    #[case("/doctor-profile", View::DoctorProfile)]
    #[case("/case-gallery", View::CaseGallery)]
    fn resolves_static_paths(#[case] path: &str, #[case] expected: View) {
        let resolved = RouteGuard::default().resolve(path).expect("known path");
        assert_eq!(resolved.descriptor.view, expected);
        assert!(resolved.params.is_empty());
    }

    #[test]
    fn captures_patient_id() {
        let resolved = RouteGuard::default()
            .resolve("/patients/3")
            .expect("patient path");
        assert_eq!(resolved.descriptor.view, View::PatientDetail);
        assert_eq!(resolved.descriptor.access, Access::Authenticated);
        assert_eq!(resolved.params.get("patientId").map(String::as_str), Some("3"));
    }

    #[rstest]
    #[case("/patients")]
    #[case("/patients/3/notes")]
    #[case("/unknown")]
    fn unknown_paths_do_not_resolve(#[case] path: &str) {
        assert!(RouteGuard::default().resolve(path).is_none());
    }
}
