#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::{parse_method, PathPattern, RequestRouter, Route, RouterError, Segment};
use http::Method;

#[test]
fn test_root_pattern() {
    let p = PathPattern::parse("/").unwrap();
    assert_eq!(p.segments(), &[Segment::Literal(String::new())]);
    assert_eq!(p.as_str(), "");
    assert_eq!(p.to_string(), "/");
}

#[test]
fn test_parameterized_pattern() {
    let p = PathPattern::parse("/users/:id/colors").unwrap();
    assert_eq!(p.segments().len(), 3);
    assert_eq!(p.param_names().collect::<Vec<_>>(), vec!["id"]);
    assert_eq!(p.as_str(), "users/:id/colors");
}

#[test]
fn test_only_one_leading_slash_stripped() {
    let p = PathPattern::parse("//a").unwrap();
    assert_eq!(
        p.segments(),
        &[Segment::Literal(String::new()), Segment::Literal("a".into())]
    );
}

#[test]
fn test_trailing_slash_kept() {
    let p = PathPattern::parse("foo/").unwrap();
    assert_eq!(p.segments().len(), 2);
}

#[test]
fn test_empty_param_name_rejected() {
    let err = PathPattern::parse("users/:/posts").unwrap_err();
    assert!(matches!(err, RouterError::EmptyParameterName { .. }));
}

#[test]
fn test_parse_method_case_insensitive() {
    assert_eq!(parse_method("get"), Some(Method::GET));
    assert_eq!(parse_method("Patch"), Some(Method::PATCH));
    assert_eq!(parse_method("TRACE"), None);
    assert_eq!(parse_method("FETCH"), None);
}

#[test]
fn test_route_rejects_unsupported_method() {
    let err = Route::new("CONNECT", "/x", "h").unwrap_err();
    assert_eq!(
        err,
        RouterError::UnsupportedMethod {
            method: "CONNECT".into()
        }
    );
}

#[test]
fn test_same_shape_ignores_param_names() {
    let a = PathPattern::parse("a/:x").unwrap();
    let b = PathPattern::parse("a/:y").unwrap();
    let c = PathPattern::parse("a/b").unwrap();
    assert!(a.same_shape(&b));
    assert!(!a.same_shape(&c));
}

#[test]
fn test_overlaps() {
    let param = PathPattern::parse("a/:x").unwrap();
    let literal = PathPattern::parse("a/b").unwrap();
    let other = PathPattern::parse("c/b").unwrap();
    let trailing = PathPattern::parse("a/").unwrap();
    assert!(param.overlaps(&literal));
    assert!(literal.overlaps(&param));
    assert!(!param.overlaps(&other));
    // A parameter never captures an empty segment
    assert!(!param.overlaps(&trailing));
}

#[test]
fn test_duplicate_shape_rejected() {
    let err = RequestRouter::build(vec![
        Route::new("GET", "a/:x", "first").unwrap(),
        Route::new("GET", "a/:y", "second").unwrap(),
    ])
    .unwrap_err();
    match err {
        RouterError::DuplicateRoute { first, second, .. } => {
            assert_eq!(first, "first");
            assert_eq!(second, "second");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_same_pattern_different_methods_allowed() {
    let router = RequestRouter::build(vec![
        Route::new("GET", "colors", "list").unwrap(),
        Route::new("POST", "colors", "create").unwrap(),
    ])
    .unwrap();
    assert_eq!(router.len(), 2);
}

#[test]
fn test_empty_router_matches_nothing() {
    let router = RequestRouter::build(Vec::new()).unwrap();
    assert!(router.is_empty());
    assert!(router.match_route("GET", "/").is_none());
}

#[test]
fn test_param_requires_non_empty_segment() {
    let router = RequestRouter::build(vec![Route::new("GET", "a/:x", "h").unwrap()]).unwrap();
    assert!(router.match_route("GET", "/a/").is_none());
    assert!(router.match_route("GET", "/a/1").is_some());
}
