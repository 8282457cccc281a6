use std::sync::Arc;

use modmatch::{EnvironmentOptions, PatternSet, Resolution, ResolveError, Scope};
use modmatch_test::{MockLoader, MockPackageManager, setup_tracing};
use pretty_assertions::assert_eq;

fn async_options() -> Option<EnvironmentOptions> {
    Some(EnvironmentOptions {
        is_async: Some(true),
        ..EnvironmentOptions::default()
    })
}

#[test]
fn merges_local_and_global_candidates() {
    setup_tracing();
    let package_manager = Arc::new(
        MockPackageManager::new()
            .with_local(&["grunt", "gulp"])
            .with_global(&["gulp", "npm"]),
    );
    let loader = Arc::new(MockLoader::new());
    let patterns = PatternSet::single(".*").expect("compile");

    let result =
        modmatch::resolve_from_environment(&patterns, None, package_manager, loader.clone())
            .expect("resolve")
            .wait()
            .expect("settled");

    assert_eq!(
        result.names().collect::<Vec<_>>(),
        vec!["grunt", "gulp", "npm"]
    );
    // `gulp` exists in both trees; the local copy must be the one loaded.
    assert_eq!(result.get("gulp").expect("gulp").scope, Scope::Local);
    assert!(
        !loader
            .recorded_loads()
            .contains(&("gulp".to_string(), Scope::Global))
    );
}

#[test]
fn sync_and_async_modes_agree() {
    let patterns = PatternSet::single("^g").expect("compile");

    let sync_result = {
        let package_manager = Arc::new(
            MockPackageManager::new()
                .with_local(&["grunt"])
                .with_global(&["gulp"]),
        );
        let resolution = modmatch::resolve_from_environment(
            &patterns,
            None,
            package_manager,
            Arc::new(MockLoader::new()),
        )
        .expect("resolve");
        assert!(resolution.is_ready());
        resolution.wait().expect("settled")
    };

    let async_result = {
        let package_manager = Arc::new(
            MockPackageManager::new()
                .with_local(&["grunt"])
                .with_global(&["gulp"]),
        );
        let resolution = modmatch::resolve_from_environment(
            &patterns,
            async_options(),
            package_manager,
            Arc::new(MockLoader::new()),
        )
        .expect("spawn");
        assert!(matches!(&resolution, Resolution::Pending(_)));
        resolution.wait().expect("settled")
    };

    assert_eq!(sync_result, async_result);
}

#[test]
fn async_mode_delivers_failures_through_the_handle() {
    let package_manager = Arc::new(
        MockPackageManager::new()
            .with_local_error("local down")
            .with_global_error("global down"),
    );
    let patterns = PatternSet::single(".*").expect("compile");

    let resolution = modmatch::resolve_from_environment(
        &patterns,
        async_options(),
        package_manager,
        Arc::new(MockLoader::new()),
    )
    .expect("spawn");

    let error = resolution.wait().expect_err("must fail");
    assert!(matches!(error, ResolveError::Introspection(_)));
}

#[test]
fn one_failed_branch_is_tolerated() {
    let package_manager = Arc::new(
        MockPackageManager::new()
            .with_local_error("registry unreachable")
            .with_global(&["gulp", "npm"]),
    );
    let patterns = PatternSet::single("^gulp").expect("compile");

    let result = modmatch::resolve_from_environment(
        &patterns,
        None,
        package_manager,
        Arc::new(MockLoader::new()),
    )
    .expect("resolve")
    .wait()
    .expect("settled");

    assert_eq!(result.names().collect::<Vec<_>>(), vec!["gulp"]);
    assert_eq!(result.get("gulp").expect("gulp").scope, Scope::Global);
}

#[test]
fn both_failed_branches_fail_the_pipeline() {
    let package_manager = Arc::new(
        MockPackageManager::new()
            .with_local_error("local down")
            .with_global_error("global down"),
    );
    let patterns = PatternSet::single(".*").expect("compile");

    let error = modmatch::resolve_from_environment(
        &patterns,
        None,
        package_manager,
        Arc::new(MockLoader::new()),
    )
    .expect_err("must fail");

    assert!(matches!(error, ResolveError::Introspection(_)));
}

#[test]
fn global_introspection_can_be_disabled() {
    let package_manager = Arc::new(
        MockPackageManager::new()
            .with_local(&["grunt"])
            .with_global(&["npm"]),
    );
    let options = Some(EnvironmentOptions {
        global: Some(false),
        ..EnvironmentOptions::default()
    });
    let patterns = PatternSet::single(".*").expect("compile");

    let result = modmatch::resolve_from_environment(
        &patterns,
        options,
        package_manager.clone(),
        Arc::new(MockLoader::new()),
    )
    .expect("resolve")
    .wait()
    .expect("settled");

    assert_eq!(result.names().collect::<Vec<_>>(), vec!["grunt"]);
    assert_eq!(package_manager.recorded_queries().len(), 1);
}

#[test]
fn unresolvable_match_fails_the_pipeline() {
    let package_manager = Arc::new(MockPackageManager::new().with_local(&["grunt", "gulp"]));
    let loader = Arc::new(MockLoader::new().with_missing(&["gulp"]));
    let patterns = PatternSet::single("^g").expect("compile");

    let error = modmatch::resolve_from_environment(&patterns, None, package_manager, loader)
        .expect_err("must fail");

    match error {
        ResolveError::ModuleResolution(error) => assert_eq!(error.module(), "gulp"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn caller_options_are_left_untouched() {
    let package_manager = Arc::new(MockPackageManager::new().with_local(&["grunt"]));
    let options = EnvironmentOptions {
        ignore_dev: Some(false),
        ..EnvironmentOptions::default()
    };
    let before = options.clone();
    let patterns = PatternSet::single(".*").expect("compile");

    modmatch::resolve_from_environment(
        &patterns,
        Some(options.clone()),
        package_manager,
        Arc::new(MockLoader::new()),
    )
    .expect("resolve")
    .wait()
    .expect("settled");

    assert_eq!(options, before);
}
