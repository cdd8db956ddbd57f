//! Concurrency tests: many navigations and loads racing for the same views.

use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;

use route_registry::navigation::{NavigationOutcome, NavigationRequest};
use route_registry::security::SessionAuth;
use route_registry::view::LazyViewLoader;
use route_registry::ViewRef;

mod common;

#[tokio::test]
async fn test_concurrent_loads_fetch_once() {
    let source = common::ProgrammableSource::new().with_delay("home/index.vue", Duration::from_millis(50));
    let loader = LazyViewLoader::new(source.clone());
    let view = ViewRef::new("home/index.vue");

    let results = join_all((0..32).map(|_| loader.load(&view))).await;

    let modules: Vec<_> = results.into_iter().map(Result::unwrap).collect();
    assert_eq!(source.calls(), 1);
    assert!(modules.iter().all(|m| Arc::ptr_eq(m, &modules[0])));
    assert_eq!(loader.cache().resolved_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_loads_fetch_once_across_tasks() {
    let source = common::ProgrammableSource::new().with_delay("home/index.vue", Duration::from_millis(100));
    let loader = LazyViewLoader::new(source.clone());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let loader = loader.clone();
            tokio::spawn(async move { loader.load(&ViewRef::new("home/index.vue")).await })
        })
        .collect();

    let mut modules = Vec::new();
    for handle in handles {
        modules.push(handle.await.unwrap().unwrap());
    }
    assert_eq!(source.calls(), 1);
    assert!(modules.iter().all(|m| Arc::ptr_eq(m, &modules[0])));
}

#[tokio::test]
async fn test_racing_navigations_share_one_fetch() {
    let source = common::ProgrammableSource::new().with_delay("home/index.vue", Duration::from_millis(50));
    let router = common::router(source.clone(), Arc::new(SessionAuth::default()));

    let outcomes = join_all((0..8).map(|_| router.navigate(NavigationRequest::push("/home")))).await;

    assert_eq!(source.calls(), 1);
    // Only the last navigation started is committed; the others are superseded.
    let allowed = outcomes
        .iter()
        .filter(|o| matches!(o, Ok(NavigationOutcome::Allowed { .. })))
        .count();
    assert_eq!(allowed, 1);
    assert_eq!(router.current().unwrap().name, "home");
}

#[tokio::test]
async fn test_many_routes_mixed_outcomes() {
    let source = common::ProgrammableSource::new();
    let router = common::router(source.clone(), Arc::new(SessionAuth::default()));

    for _ in 0..10 {
        for target in ["/home", "/login", "/settings", "/missing"] {
            let _ = router.navigate(NavigationRequest::push(target)).await;
        }
    }

    // Settings is never fetched for an anonymous session, and nothing is fetched twice.
    assert_eq!(source.calls_for("settings/index.vue"), 0);
    assert_eq!(source.calls(), 2);
    assert_eq!(router.loader().cache().resolved_count(), 2);
}
