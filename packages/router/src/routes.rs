//! Route definitions and path resolution.
//!
//! A [`RouteTable`] maps a requested location to exactly one of a small fixed
//! set of named routes. It is declared once at application start and is
//! immutable afterwards; resolution is a pure function of the table and the
//! requested path.

use std::collections::{BTreeMap, HashMap};

use urlencoding::{decode, encode};

use crate::{
    history::HistoryMode,
    lazy::LazyContent,
    navigation::NavigationTarget,
};

/// The content a route renders.
#[derive(Clone)]
pub enum RouteContent<T: Clone> {
    /// Content compiled in and available at startup.
    Static(T),
    /// Content fetched when the route is first navigated to.
    Deferred(LazyContent<T>),
}

/// A single route: a name and the content it leads to.
#[derive(Clone)]
pub struct Route<T: Clone> {
    pub(crate) name: &'static str,
    pub(crate) content: RouteContent<T>,
}

impl<T: Clone> Route<T> {
    /// Create a route with static content.
    pub fn content(name: &'static str, content: T) -> Self {
        Self {
            name,
            content: RouteContent::Static(content),
        }
    }

    /// Create a route whose content is loaded on first navigation.
    pub fn deferred(name: &'static str, content: LazyContent<T>) -> Self {
        Self {
            name,
            content: RouteContent::Deferred(content),
        }
    }

    /// The unique name of the route.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

struct ParameterRoute<T: Clone> {
    key: &'static str,
    route: Route<T>,
    /// Substituted when a named target omits the parameter.
    default: Option<&'static str>,
}

/// A successful resolution: the route to render and its bound parameters.
#[derive(Clone)]
pub struct RouteMatch<T: Clone> {
    /// The name of the matched route.
    pub name: &'static str,
    /// The path parameters captured during matching, percent-decoded.
    pub parameters: HashMap<&'static str, String>,
    /// The content the route leads to.
    pub content: RouteContent<T>,
}

/// The result of resolving a path against a [`RouteTable`].
#[derive(Clone)]
pub enum Resolution<T: Clone> {
    /// The path maps to a route.
    Page(RouteMatch<T>),
    /// The navigation layer should re-resolve against this target instead of
    /// rendering.
    Redirect(NavigationTarget),
    /// No route matches the path.
    NotFound,
}

/// The route table of the application.
///
/// Built once from a [`HistoryMode`] through a builder in the style of a
/// segment definition: fixed segments, at most one parameter segment, a root
/// redirect and a fallback route.
pub struct RouteTable<T: Clone> {
    mode: HistoryMode,
    root: Option<NavigationTarget>,
    fixed: BTreeMap<&'static str, Route<T>>,
    parameter: Option<ParameterRoute<T>>,
    fallback: Option<Route<T>>,
}

impl<T: Clone> RouteTable<T> {
    /// Create an empty table for the given [`HistoryMode`].
    pub fn new(mode: HistoryMode) -> Self {
        Self {
            mode,
            root: None,
            fixed: BTreeMap::new(),
            parameter: None,
            fallback: None,
        }
    }

    /// The history mode this table was built for.
    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    /// Redirect the root path to `target`.
    ///
    /// # Error Handling
    /// May only be called once per table. In _debug mode_ the second call will
    /// panic. In _release mode_, all calls after the first will be ignored.
    pub fn redirect_root(mut self, target: impl Into<NavigationTarget>) -> Self {
        debug_assert!(self.root.is_none(), "root redirect cannot be changed");
        self.root.get_or_insert(target.into());
        self
    }

    /// Add a route under a fixed path segment.
    pub fn fixed(mut self, segment: &'static str, route: Route<T>) -> Self {
        self.assert_unique_name(route.name);
        let previous = self.fixed.insert(segment, route);
        debug_assert!(previous.is_none(), "duplicate fixed segment: {segment}");
        self
    }

    /// Add a route matching any single path segment, binding it as the
    /// parameter `key`.
    ///
    /// `default` is substituted when a named navigation target for this route
    /// omits the parameter.
    ///
    /// # Error Handling
    /// May only be called once per table. In _debug mode_ the second call will
    /// panic. In _release mode_, all calls after the first will be ignored.
    pub fn parameter(
        mut self,
        key: &'static str,
        route: Route<T>,
        default: Option<&'static str>,
    ) -> Self {
        self.assert_unique_name(route.name);
        debug_assert!(self.parameter.is_none(), "parameter route cannot be changed");
        self.parameter.get_or_insert(ParameterRoute {
            key,
            route,
            default,
        });
        self
    }

    /// Set the route used when no other route matches.
    ///
    /// # Error Handling
    /// May only be called once per table. In _debug mode_ the second call will
    /// panic. In _release mode_, all calls after the first will be ignored.
    pub fn fallback(mut self, route: Route<T>) -> Self {
        self.assert_unique_name(route.name);
        debug_assert!(self.fallback.is_none(), "fallback route cannot be changed");
        self.fallback.get_or_insert(route);
        self
    }

    fn assert_unique_name(&self, name: &'static str) {
        debug_assert!(
            !self.fixed.values().any(|r| r.name == name)
                && !matches!(&self.parameter, Some(p) if p.route.name == name)
                && !matches!(&self.fallback, Some(r) if r.name == name),
            "duplicate route name: {name}"
        );
    }

    /// The fallback route, if one was declared.
    pub fn fallback_route(&self) -> Option<&Route<T>> {
        self.fallback.as_ref()
    }

    /// Resolve a requested location to a route.
    ///
    /// The path is expected to include the base prefix under
    /// [`HistoryMode::Path`]; locations outside the prefix do not resolve.
    /// Captured parameters are percent-decoded. No validation is performed on
    /// parameter values; whether they correspond to real content is the
    /// rendering layer's concern.
    pub fn resolve(&self, path: &str) -> Resolution<T> {
        let mut path = match self.strip_prefix(path) {
            Some(path) => path,
            None => {
                tracing::debug!("location outside base prefix: {path}");
                return Resolution::NotFound;
            }
        };

        if path.len() > 1 && path.ends_with('/') {
            path = &path[..path.len() - 1];
        }

        if path == "/" {
            return match &self.root {
                Some(target) => Resolution::Redirect(target.clone()),
                None => Resolution::NotFound,
            };
        }

        let Some(segment) = path.strip_prefix('/') else {
            return Resolution::NotFound;
        };
        // only single-segment routes exist in this app
        if segment.is_empty() || segment.contains('/') {
            return Resolution::NotFound;
        }

        if let Some(route) = self.fixed.get(segment) {
            return Resolution::Page(RouteMatch {
                name: route.name,
                parameters: HashMap::new(),
                content: route.content.clone(),
            });
        }

        if let Some(parameter) = &self.parameter {
            let value = decode(segment)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| segment.to_string());
            let mut parameters = HashMap::new();
            parameters.insert(parameter.key, value);
            return Resolution::Page(RouteMatch {
                name: parameter.route.name,
                parameters,
                content: parameter.route.content.clone(),
            });
        }

        Resolution::NotFound
    }

    fn strip_prefix<'p>(&self, path: &'p str) -> Option<&'p str> {
        match self.mode.prefix() {
            None => Some(path),
            Some(base) if path == base => Some("/"),
            Some(base) => match path.strip_prefix(base) {
                Some(rest) if rest.starts_with('/') => Some(rest),
                _ => None,
            },
        }
    }

    /// Get the full href for a navigation target, including the base prefix.
    ///
    /// Returns [`None`] for named targets that cannot be constructed. In
    /// _debug mode_ an unknown name panics.
    pub fn href(&self, target: &NavigationTarget) -> Option<String> {
        let path = match target {
            NavigationTarget::Internal(path) => path.clone(),
            NavigationTarget::Named { name, parameters } => self.named_path(name, parameters)?,
        };
        Some(match self.mode.prefix() {
            Some(base) => format!("{base}{path}"),
            None => path,
        })
    }

    /// Construct the path for a named route, without the base prefix.
    fn named_path(&self, name: &str, parameters: &[(&'static str, String)]) -> Option<String> {
        for (segment, route) in &self.fixed {
            if route.name == name {
                return Some(format!("/{segment}"));
            }
        }

        if let Some(parameter) = &self.parameter {
            if parameter.route.name == name {
                let value = parameters
                    .iter()
                    .find(|(key, _)| *key == parameter.key)
                    .map(|(_, value)| encode(value).into_owned())
                    .or_else(|| parameter.default.map(str::to_string));
                return match value {
                    Some(value) => Some(format!("/{value}")),
                    None => {
                        tracing::error!(
                            "named target {name} is missing parameter {}",
                            parameter.key
                        );
                        None
                    }
                };
            }
        }

        debug_assert!(false, "named navigation to unknown name: {name}");
        None
    }
}
