//! Integration tests for alias-aware key resolution.

use funbox::container::{Alias, AliasTable, Resolve};
use funbox::{Container, Error, Value};
use rstest::{fixture, rstest};

#[fixture]
fn container() -> Container {
    let container = Container::new();
    container.define_value("app.math.map", "app.math.map").unwrap();
    container.define_value("app.math.inner.map", "app.math.inner.map").unwrap();
    container.define_value("app.text.map", "app.text.map").unwrap();
    container.define_value("map", "map").unwrap();
    container
}

// =============================================================================
// Alias Precedence
// =============================================================================

#[rstest]
fn most_recent_alias_is_probed_first(container: Container) {
    let resolve = Resolve::build(&container, [("app.math", "m"), ("app.math.inner", "m")]);

    assert_eq!(resolve.resolve("m.map").unwrap(), Value::from("app.math.inner.map"));
}

#[rstest]
fn earlier_alias_is_used_when_later_one_misses(container: Container) {
    let resolve = Resolve::build(&container, [("app.math", "m"), ("app.nothing", "m")]);

    assert_eq!(resolve.resolve("m.map").unwrap(), Value::from("app.math.map"));
}

#[rstest]
fn namespace_aliases_prefix_the_key(container: Container) {
    let resolve = Resolve::build(&container, ["app.text", "app.math"]);

    assert_eq!(resolve.resolve("map").unwrap(), Value::from("app.math.map"));
}

#[rstest]
fn raw_key_is_the_last_resort(container: Container) {
    let resolve = Resolve::build(&container, ["app.nothing"]);

    assert_eq!(resolve.resolve("map").unwrap(), Value::from("map"));
    assert_eq!(resolve.resolve("app.text.map").unwrap(), Value::from("app.text.map"));
}

#[rstest]
fn redeclared_namespace_keeps_first_position_and_last_shortcut() {
    let table = AliasTable::new([
        Alias::from(("app.math", "m")),
        Alias::from("app.text"),
        Alias::from(("app.math", "math")),
    ]);
    let aliases: Vec<Alias> = table.iter().collect();

    assert_eq!(
        aliases,
        vec![
            Alias::from("app.text"),
            Alias::from(("app.math", "math")),
        ]
    );
}

// =============================================================================
// Segment Boundaries
// =============================================================================

#[rstest]
fn shortcut_does_not_match_inside_a_segment(container: Container) {
    let resolve = Resolve::build(&container, [("app.math", "m")]);

    assert_eq!(resolve.resolve("mango"), Err(Error::key_not_found("mango")));
}

#[rstest]
fn shortcut_does_not_match_a_segment_prefix(container: Container) {
    container.define_value("math.map", "math.map").unwrap();
    let resolve = Resolve::build(&container, [("app.text", "m")]);

    assert_eq!(resolve.resolve("math.map").unwrap(), Value::from("math.map"));
}

#[rstest]
fn shortcut_matches_a_middle_segment(container: Container) {
    container.define_value("core.app.math.map", "core.app.math.map").unwrap();
    let resolve = Resolve::build(&container, [("app.math", "m")]);

    assert_eq!(resolve.resolve("core.m.map").unwrap(), Value::from("core.app.math.map"));
}

#[rstest]
fn multi_segment_shortcut(container: Container) {
    let resolve = Resolve::build(&container, [("app.math.inner", "a.b")]);

    assert_eq!(resolve.resolve("a.b.map").unwrap(), Value::from("app.math.inner.map"));
}

#[rstest]
fn candidates_are_listed_in_probe_order() {
    let table = AliasTable::new([Alias::from("app"), Alias::from(("app.math", "m"))]);
    let candidates: Vec<String> = table.candidates("m.sum").collect();

    assert_eq!(candidates, vec!["app.math.sum".to_string(), "app.m.sum".to_string()]);
}

// =============================================================================
// Error Propagation
// =============================================================================

#[rstest]
fn miss_names_the_requested_key(container: Container) {
    let resolve = Resolve::build(
        &container,
        [Alias::from("app.math"), Alias::from(("app.text", "t"))],
    );

    assert_eq!(resolve.resolve("t.unknown"), Err(Error::key_not_found("t.unknown")));
}

#[rstest]
fn definition_failures_are_not_skipped(container: Container) {
    container
        .define("app.math.broken", || Err(Error::failed("broken on purpose")))
        .unwrap();
    container.define_value("broken", "fallback").unwrap();
    let resolve = Resolve::build(&container, ["app.math"]);

    assert_eq!(resolve.resolve("broken"), Err(Error::failed("broken on purpose")));
}

#[rstest]
fn nested_missing_keys_are_not_skipped(container: Container) {
    let handle = container.clone();
    container
        .define("app.math.needs", move || handle.fetch("app.math.absent"))
        .unwrap();
    container.define_value("needs", "fallback").unwrap();
    let resolve = Resolve::build(&container, ["app.math"]);

    assert_eq!(
        resolve.resolve("needs"),
        Err(Error::key_not_found("app.math.absent"))
    );
}
