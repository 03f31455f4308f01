//! Evaluation order and short-circuiting, observed through probes.

use verimatch::{AllOf, AnyOf, StringDescription};
use verimatch_test::prelude::*;

fn mismatch<M: Matcher<i32>>(matcher: &M, actual: i32) -> String {
    let mut out = StringDescription::new();
    matcher.describe_mismatch(&actual, &mut out);
    out.into_string()
}

#[test]
fn all_of_stops_at_first_failure() {
    let a = Probe::failing("a");
    let b = Probe::matching("b");

    let m = all_of![a.clone(), b.clone()].unwrap();
    assert!(!Matcher::<i32>::matches(&m, &1));

    assert_eq!(a.calls(), 1);
    assert!(b.untouched());
}

#[test]
fn all_of_evaluates_every_child_when_all_match() {
    let probes: Vec<Probe> = (0..5).map(|i| Probe::matching(format!("p{i}"))).collect();
    let m = AllOf::<i32>::new(probes.iter().cloned().map(verimatch::boxed).collect()).unwrap();

    assert!(m.matches(&0));
    assert!(probes.iter().all(|p| p.calls() == 1));
}

fn nest_all_of(leaf: &Probe, depth: usize) -> AllOf<i32> {
    let mut m = AllOf::new(vec![verimatch::boxed(leaf.clone())]).unwrap();
    for _ in 1..depth {
        m = AllOf::new(vec![verimatch::boxed(m)]).unwrap();
    }
    m
}

#[test]
fn nested_all_of_consults_the_leaf_once() {
    let leaf = Probe::failing("leaf");
    let m = nest_all_of(&leaf, 10);

    assert!(!m.matches(&0));
    assert_eq!(leaf.calls(), 1);
}

#[test]
fn nested_all_of_mismatch_is_linear_in_depth() {
    let leaf = Probe::failing("leaf");
    let m = nest_all_of(&leaf, 10);

    // One decision per level on the way down.
    assert!(mismatch(&m, 0).ends_with("leaf was <0>"));
    assert_eq!(leaf.calls(), 10);
}

#[test]
fn any_of_stops_at_first_success() {
    let a = Probe::failing("a");
    let b = Probe::matching("b");
    let c = Probe::matching("c");

    let m = any_of![a.clone(), b.clone(), c.clone()].unwrap();
    assert!(Matcher::<i32>::matches(&m, &1));

    assert_eq!(a.calls(), 1);
    assert_eq!(b.calls(), 1);
    assert!(c.untouched());
}

#[test]
fn any_of_all_failing_visits_every_child() {
    let probes: Vec<Probe> = (0..3).map(|i| Probe::failing(format!("p{i}"))).collect();
    let m = AnyOf::<i32>::new(probes.iter().cloned().map(verimatch::boxed).collect()).unwrap();

    assert!(!m.matches(&7));
    assert!(probes.iter().all(|p| p.calls() == 1));
    assert_eq!(mismatch(&m, 7), "was <7>");
}

#[test]
fn all_of_mismatch_names_the_failing_child() {
    let m = all_of![Probe::matching("first"), Probe::failing("second"), Probe::failing("third")].unwrap();
    assert_eq!(mismatch(&m, 3), "second was <3>");
    assert_eq!(StringDescription::describe(&m), "(first and second and third)");
}

#[test]
fn both_and_either_short_circuit() {
    let left = Probe::failing("left");
    let right = Probe::matching("right");

    let m = both::<i32, _>(left.clone()).and(right.clone());
    assert!(!m.matches(&0));
    assert!(right.untouched());

    left.reset();
    let m = either::<i32, _>(right.clone()).or(left.clone());
    assert!(m.matches(&0));
    assert_eq!(right.calls(), 1);
    assert!(left.untouched());
}

#[test]
fn not_consults_inner_once() {
    let inner = Probe::matching("inner");
    let m = not(inner.clone());

    assert!(!Matcher::<i32>::matches(&m, &0));
    assert_eq!(inner.calls(), 1);
}

#[test]
fn matches_is_deterministic() {
    let m = both(starting_with("a")).and(not(containing("z")));
    for _ in 0..3 {
        assert!(m.matches("abc"));
        assert!(!m.matches("abz"));
    }
}

#[test]
fn check_that_renders_probe_failures() {
    let failure = check_that("probe check", &5i32, Probe::failing("never")).unwrap_err();
    assert_eq!(failure.to_string(), "probe check\nExpected: never\n     but: was <5>");
}
