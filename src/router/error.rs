use std::fmt;

/// Route table configuration error
///
/// Returned while constructing a [`Route`](super::Route) or building a
/// [`RequestRouter`](super::RequestRouter). These errors mean the route table
/// is invalid for the lifetime of the process and should abort startup.
/// A request that matches no route is never reported through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The method is not one of GET, POST, PUT, DELETE, PATCH, OPTIONS, HEAD
    UnsupportedMethod {
        /// The method string as registered
        method: String,
    },
    /// A `:` placeholder without a name (e.g. `users/:/posts`)
    EmptyParameterName {
        /// The offending pattern
        pattern: String,
    },
    /// Two routes share the same method and structurally identical pattern
    ///
    /// Patterns that differ only in parameter names (`a/:x` and `a/:y`)
    /// are structurally identical.
    DuplicateRoute {
        /// HTTP method shared by both routes
        method: String,
        /// Pattern of the route registered second
        pattern: String,
        /// Handler of the route registered first
        first: String,
        /// Handler of the route registered second
        second: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::UnsupportedMethod { method } => {
                write!(
                    f,
                    "Route configuration error: unsupported HTTP method '{}'. \
                    Expected one of GET, POST, PUT, DELETE, PATCH, OPTIONS, HEAD",
                    method
                )
            }
            RouterError::EmptyParameterName { pattern } => {
                write!(
                    f,
                    "Route configuration error: pattern '{}' contains a parameter without a name",
                    pattern
                )
            }
            RouterError::DuplicateRoute {
                method,
                pattern,
                first,
                second,
            } => {
                write!(
                    f,
                    "Route configuration error: {} {} for handler '{}' duplicates the route \
                    already registered for handler '{}'",
                    method, pattern, second, first
                )
            }
        }
    }
}

impl std::error::Error for RouterError {}
