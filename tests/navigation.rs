//! End-to-end navigation tests.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use route_registry::lifecycle::start_from_file;
use route_registry::navigation::{NavigationError, NavigationMode, NavigationOutcome, NavigationRequest};
use route_registry::security::{DenyReason, SessionAuth};

mod common;

#[tokio::test]
async fn test_public_home_resolves_anonymously() {
    let source = common::ProgrammableSource::new();
    let router = common::router(source.clone(), Arc::new(SessionAuth::default()));

    let outcome = router.navigate(NavigationRequest::push("/home")).await.unwrap();
    match outcome {
        NavigationOutcome::Allowed { title, view } => {
            assert_eq!(title, "P2P视频通话");
            assert_eq!(view.view.as_str(), "home/index.vue");
        }
        other => panic!("expected Allowed, got {other:?}"),
    }

    let current = router.current().expect("route committed");
    assert_eq!(current.name, "home");
    assert_eq!(current.title, "P2P视频通话");
    assert_eq!(current.mode, NavigationMode::Push);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_unregistered_path_never_loads() {
    let source = common::ProgrammableSource::new();
    let router = common::router(source.clone(), Arc::new(SessionAuth::default()));

    let err = router.navigate(NavigationRequest::push("/nowhere")).await.unwrap_err();
    assert!(matches!(err, NavigationError::NotFound { ref path } if path == "/nowhere"));
    assert_eq!(source.calls(), 0);
    assert!(router.current().is_none());
}

#[tokio::test]
async fn test_private_route_redirects_without_loading() {
    let source = common::ProgrammableSource::new();
    let router = common::router(source.clone(), Arc::new(SessionAuth::default()));

    let outcome = router
        .navigate(NavigationRequest::push("/settings?tab=profile"))
        .await
        .unwrap();
    match outcome {
        NavigationOutcome::Redirected { target, return_to } => {
            assert_eq!(target, "/login?redirect=%2Fsettings%3Ftab%3Dprofile");
            assert_eq!(return_to, "/settings?tab=profile");
        }
        other => panic!("expected Redirected, got {other:?}"),
    }
    assert_eq!(source.calls(), 0);
    assert!(router.current().is_none());
}

#[tokio::test]
async fn test_auth_state_queried_fresh_each_navigation() {
    let source = common::ProgrammableSource::new();
    let auth = Arc::new(SessionAuth::default());
    let router = common::router(source.clone(), auth.clone());

    let first = router.navigate(NavigationRequest::push("/settings")).await.unwrap();
    assert!(matches!(first, NavigationOutcome::Redirected { .. }));

    auth.sign_in();
    let second = router.navigate(NavigationRequest::replace("/settings/")).await.unwrap();
    match second {
        NavigationOutcome::Allowed { title, .. } => assert_eq!(title, "Settings - MyApp"),
        other => panic!("expected Allowed, got {other:?}"),
    }
    assert_eq!(router.current().unwrap().mode, NavigationMode::Replace);
}

#[tokio::test]
async fn test_navigate_to_name() {
    let source = common::ProgrammableSource::new();
    let router = common::router(source, Arc::new(SessionAuth::default()));

    let outcome = router.navigate_to_name("login", NavigationMode::Push).await.unwrap();
    match outcome {
        NavigationOutcome::Allowed { title, .. } => assert_eq!(title, "Sign in - MyApp"),
        other => panic!("expected Allowed, got {other:?}"),
    }

    let err = router.navigate_to_name("missing", NavigationMode::Push).await.unwrap_err();
    assert!(matches!(err, NavigationError::UnknownName { .. }));
}

#[tokio::test]
async fn test_query_and_fragment_kept_on_current_route() {
    let source = common::ProgrammableSource::new();
    let router = common::router(source, Arc::new(SessionAuth::default()));

    router.navigate(NavigationRequest::push("/home/?room=42#video")).await.unwrap();
    let current = router.current().unwrap();
    assert_eq!(current.path, "/home");
    assert_eq!(current.query, vec![("room".to_string(), "42".to_string())]);
    assert_eq!(current.fragment.as_deref(), Some("video"));
}

#[tokio::test]
async fn test_superseded_navigation_does_not_overwrite_current() {
    let source = common::ProgrammableSource::new().with_delay("slow/index.vue", Duration::from_millis(200));
    let router = common::router(source.clone(), Arc::new(SessionAuth::default()));

    let (slow, fast) = tokio::join!(router.navigate(NavigationRequest::push("/slow")), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        router.navigate(NavigationRequest::push("/home")).await
    });

    assert!(matches!(fast, Ok(NavigationOutcome::Allowed { .. })));
    assert!(matches!(slow, Err(NavigationError::Superseded { ref path }) if path == "/slow"));
    assert_eq!(router.current().unwrap().name, "home");

    // The discarded navigation's module still landed in the cache.
    assert!(router.loader().cache().is_resolved(&"slow/index.vue".into()));
    router.navigate(NavigationRequest::push("/slow")).await.unwrap();
    assert_eq!(source.calls_for("slow/index.vue"), 1);
}

#[tokio::test]
async fn test_superseded_navigation_discards_failed_load() {
    let source = common::ProgrammableSource::new()
        .with_delay("slow/index.vue", Duration::from_millis(200))
        .failing("slow/index.vue", 1);
    let router = common::router(source.clone(), Arc::new(SessionAuth::default()));

    let (slow, fast) = tokio::join!(router.navigate(NavigationRequest::push("/slow")), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        router.navigate(NavigationRequest::push("/home")).await
    });

    assert!(matches!(fast, Ok(NavigationOutcome::Allowed { .. })));
    assert!(matches!(slow, Err(NavigationError::Superseded { ref path }) if path == "/slow"));
    assert_eq!(router.current().unwrap().name, "home");

    // The failure was not cached: the next navigation retries and resolves.
    assert!(!router.loader().cache().is_resolved(&"slow/index.vue".into()));
    router.navigate(NavigationRequest::push("/slow")).await.unwrap();
    assert_eq!(source.calls_for("slow/index.vue"), 2);
    assert_eq!(router.current().unwrap().name, "slow");
}

#[tokio::test]
async fn test_private_login_route_is_denied() {
    use route_registry::config::GuardConfig;
    use route_registry::routing::{DescriptorTable, RouteDescriptor};
    use route_registry::security::NavigationGuard;
    use route_registry::title::TitleResolver;
    use route_registry::view::LazyViewLoader;
    use route_registry::Router;

    let source = common::ProgrammableSource::new();
    let table = DescriptorTable::from_descriptors(vec![RouteDescriptor::new(
        "/login",
        "login",
        "login/index.vue",
    )])
    .unwrap();
    let router = Router::new(
        Arc::new(table),
        LazyViewLoader::new(source.clone()),
        TitleResolver::new(common::title_config()),
        NavigationGuard::new(GuardConfig::default()),
        Arc::new(SessionAuth::default()),
    );

    let outcome = router.navigate(NavigationRequest::push("/login")).await.unwrap();
    assert!(matches!(
        outcome,
        NavigationOutcome::Denied {
            reason: DenyReason::RedirectLoop
        }
    ));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_demo_config_end_to_end() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/routes.toml");
    let (config, router) = start_from_file(&path, Arc::new(SessionAuth::default())).unwrap();
    assert_eq!(config.title.suffix, "MyApp");

    let outcome = router.navigate(NavigationRequest::push("/home")).await.unwrap();
    match outcome {
        NavigationOutcome::Allowed { title, view } => {
            assert_eq!(title, "P2P视频通话");
            assert!(view.body.contains("P2P video call"));
        }
        other => panic!("expected Allowed, got {other:?}"),
    }

    let outcome = router.navigate(NavigationRequest::push("/settings")).await.unwrap();
    assert!(matches!(outcome, NavigationOutcome::Redirected { .. }));
}
