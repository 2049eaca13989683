use super::error::RouterError;
use http::Method;
use std::fmt;
use std::sync::Arc;

/// HTTP methods a route may be registered for.
pub const SUPPORTED_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
    Method::HEAD,
];

/// Parse a method string into one of [`SUPPORTED_METHODS`].
///
/// Comparison is case-insensitive; `"get"` and `"GET"` both yield
/// [`Method::GET`]. Returns `None` for anything outside the supported set.
#[must_use]
pub fn parse_method(method: &str) -> Option<Method> {
    let upper = method.trim().to_ascii_uppercase();
    SUPPORTED_METHODS
        .iter()
        .find(|m| m.as_str() == upper)
        .cloned()
}

/// One segment of a [`PathPattern`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment exactly
    Literal(String),
    /// Captures any non-empty request segment under this name
    Param(Arc<str>),
}

impl Segment {
    /// Whether this segment accepts the given request segment.
    #[inline]
    #[must_use]
    pub fn accepts(&self, candidate: &str) -> bool {
        match self {
            Segment::Literal(lit) => lit == candidate,
            Segment::Param(_) => !candidate.is_empty(),
        }
    }
}

/// A slash-delimited path template such as `users/:id/colors`
///
/// The textual form strips a single leading slash and splits on `/`, the
/// same normalisation applied to request paths, so `/` becomes one empty
/// literal segment and trailing slashes are kept as empty segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern using the `:name` placeholder convention.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::EmptyParameterName`] for a bare `:` segment.
    pub fn parse(pattern: &str) -> Result<Self, RouterError> {
        let trimmed = pattern.strip_prefix('/').unwrap_or(pattern);
        let segments = trimmed
            .split('/')
            .map(|seg| match seg.strip_prefix(':') {
                Some("") => Err(RouterError::EmptyParameterName {
                    pattern: pattern.to_string(),
                }),
                Some(name) => Ok(Segment::Param(Arc::from(name))),
                None => Ok(Segment::Literal(seg.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }

    /// Pattern text without the leading slash
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameter segments, left to right
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_ref()),
            Segment::Literal(_) => None,
        })
    }

    /// Two patterns are structurally identical when they have the same
    /// literals at the same positions and parameters everywhere else,
    /// regardless of parameter names.
    #[must_use]
    pub fn same_shape(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Whether some request path could match both patterns.
    #[must_use]
    pub fn overlaps(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Literal(lit))
                    | (Segment::Literal(lit), Segment::Param(_)) => !lit.is_empty(),
                    (Segment::Param(_), Segment::Param(_)) => true,
                })
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.raw)
    }
}

/// A registered endpoint: method, path pattern and handler reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub pattern: PathPattern,
    /// Opaque handler reference, normally the OpenAPI `operationId`
    pub handler_name: Arc<str>,
}

impl Route {
    /// Create a route from its textual parts.
    ///
    /// # Errors
    ///
    /// Fails with [`RouterError::UnsupportedMethod`] when `method` is not in
    /// [`SUPPORTED_METHODS`], or [`RouterError::EmptyParameterName`] when the
    /// pattern has an unnamed placeholder.
    pub fn new(
        method: &str,
        pattern: &str,
        handler_name: impl Into<Arc<str>>,
    ) -> Result<Self, RouterError> {
        let method = parse_method(method).ok_or_else(|| RouterError::UnsupportedMethod {
            method: method.to_string(),
        })?;
        Ok(Self {
            method,
            pattern: PathPattern::parse(pattern)?,
            handler_name: handler_name.into(),
        })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.method, self.pattern, self.handler_name)
    }
}
