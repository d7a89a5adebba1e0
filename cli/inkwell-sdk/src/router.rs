//! Static path to view table.

use serde::Serialize;
use tracing::trace;

/// Redirect chains longer than this are treated as unresolvable.
const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRoute {
    /// Relative to the parent path. Empty for the index view.
    pub path: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    Redirect(&'static str),
    Layout {
        layout: &'static str,
        children: &'static [ChildRoute],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub target: RouteTarget,
}

pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        target: RouteTarget::Redirect("/user"),
    },
    Route {
        path: "/user",
        target: RouteTarget::Layout {
            layout: "UserLayout",
            children: &[
                ChildRoute {
                    path: "",
                    name: "UserHome",
                },
                ChildRoute {
                    path: "notes",
                    name: "UserNotes",
                },
                ChildRoute {
                    path: "profile",
                    name: "UserProfile",
                },
            ],
        },
    },
    Route {
        path: "/admin",
        target: RouteTarget::Layout {
            layout: "AdminLayout",
            children: &[
                ChildRoute {
                    path: "",
                    name: "AdminDashboard",
                },
                ChildRoute {
                    path: "users",
                    name: "UserManagement",
                },
                ChildRoute {
                    path: "notes",
                    name: "NotesManagement",
                },
                ChildRoute {
                    path: "settings",
                    name: "SystemSettings",
                },
            ],
        },
    },
];

/// Where a path ends up after redirects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    /// The path after following redirects.
    pub path: String,
    pub layout: &'static str,
    pub view: &'static str,
}

/// Resolve `path` against [ROUTES].
///
/// Query strings, fragments and trailing slashes are ignored. Returns `None`
/// for unknown paths.
pub fn resolve(path: &str) -> Option<ResolvedRoute> {
    let mut current = normalize(path);
    for _ in 0..=MAX_REDIRECTS {
        let (route, rest) = ROUTES
            .iter()
            .find_map(|route| match_prefix(route.path, &current).map(|rest| (route, rest)))?;

        match route.target {
            RouteTarget::Redirect(to) if rest.is_empty() => {
                trace!(from = %current, to, "following redirect");
                current = normalize(to);
            },
            RouteTarget::Redirect(_) => return None,
            RouteTarget::Layout { layout, children } => {
                let child = children.iter().find(|child| child.path == rest)?;
                return Some(ResolvedRoute {
                    path: current,
                    layout,
                    view: child.name,
                });
            },
        }
    }
    None
}

fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// The remainder of `path` below `prefix`, without the separating slash.
fn match_prefix<'p>(prefix: &str, path: &'p str) -> Option<&'p str> {
    if path == prefix {
        return Some("");
    }
    if prefix == "/" {
        return None;
    }
    path.strip_prefix(prefix)?.strip_prefix('/')
}
