//! Types describing navigation.

/// A target for the router to navigate to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Navigate to the specified route path.
    ///
    /// Under path mode this is the path *without* the base prefix; the prefix
    /// is added when the target is turned into an href.
    Internal(String),
    /// Navigate to the route with the corresponding name.
    Named {
        /// The unique name of the target route.
        name: &'static str,
        /// Values to insert into the path needed to reach the route.
        parameters: Vec<(&'static str, String)>,
    },
}

impl NavigationTarget {
    /// Create a [`NavigationTarget::Named`] without parameters.
    ///
    /// ```rust
    /// # use blog_router::navigation::NavigationTarget;
    /// let target = NavigationTarget::named("home");
    /// assert_eq!(
    ///     target,
    ///     NavigationTarget::Named { name: "home", parameters: Vec::new() }
    /// );
    /// ```
    pub fn named(name: &'static str) -> Self {
        Self::Named {
            name,
            parameters: Vec::new(),
        }
    }

    /// Add a parameter to a [`NavigationTarget::Named`].
    ///
    /// Has no effect on [`NavigationTarget::Internal`].
    pub fn parameter(mut self, key: &'static str, value: impl Into<String>) -> Self {
        if let Self::Named { parameters, .. } = &mut self {
            parameters.push((key, value.into()));
        }
        self
    }
}

impl From<&str> for NavigationTarget {
    fn from(path: &str) -> Self {
        Self::Internal(path.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(path: String) -> Self {
        Self::Internal(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_with_parameter() {
        assert_eq!(
            NavigationTarget::named("home").parameter("index", "042"),
            NavigationTarget::Named {
                name: "home",
                parameters: vec![("index", String::from("042"))],
            }
        );
    }

    #[test]
    fn parameter_ignored_on_internal() {
        assert_eq!(
            NavigationTarget::from("/about").parameter("index", "042"),
            NavigationTarget::Internal(String::from("/about"))
        );
    }
}
