use std::sync::Arc;

use folio::auth::SessionAuth;
use folio::loader::{ContentLoader, LoadOutcome};
use folio::navigation::NavigationKey;

use crate::support::{eventually, named_user, user, Lookup, ScriptedRepository};

fn loader(repo: &Arc<ScriptedRepository>, auth: &Arc<SessionAuth>) -> ContentLoader {
    ContentLoader::new(repo.clone(), repo.clone(), auth.clone())
}

#[tokio::test]
async fn nothing_loads_until_session_resolves() {
    let repo = Arc::new(ScriptedRepository::new());
    let auth = Arc::new(SessionAuth::pending());
    let loader = loader(&repo, &auth);

    assert_eq!(
        loader.navigate(NavigationKey::folder("b")).await,
        LoadOutcome::Deferred
    );
    assert!(loader.observe().is_loading);
    assert_eq!(repo.calls(Lookup::Details), 0);
    assert_eq!(repo.calls(Lookup::Subfolders), 0);

    let (outcome, _) = tokio::join!(loader.start(), async {
        tokio::task::yield_now().await;
        auth.resolve(Some(user()));
    });

    assert!(outcome.is_committed());
    let view = loader.observe();
    assert!(!view.is_loading);
    assert_eq!(view.folder.unwrap().id.as_str(), "b");
    assert_eq!(repo.calls(Lookup::Details), 1);
}

#[tokio::test]
async fn session_without_user_leaves_empty_idle_state() {
    let repo = Arc::new(ScriptedRepository::new());
    let auth = Arc::new(SessionAuth::pending());
    let loader = loader(&repo, &auth);

    auth.resolve(None);
    assert_eq!(loader.start().await, LoadOutcome::NotAuthenticated);
    assert_eq!(
        loader.navigate(NavigationKey::folder("a")).await,
        LoadOutcome::NotAuthenticated
    );

    let view = loader.observe();
    assert!(!view.is_loading);
    assert!(view.is_empty());
    assert_eq!(repo.calls(Lookup::Subfolders), 0);
}

#[tokio::test]
async fn signing_in_later_loads_requested_folder() {
    let repo = Arc::new(ScriptedRepository::new());
    let auth = Arc::new(SessionAuth::resolved_with(None));
    let loader = loader(&repo, &auth);
    assert_eq!(loader.start().await, LoadOutcome::NotAuthenticated);
    assert_eq!(
        loader.navigate(NavigationKey::folder("b")).await,
        LoadOutcome::NotAuthenticated
    );

    auth.resolve(Some(user()));
    eventually(|| {
        let view = loader.observe();
        !view.is_loading && view.folder.as_ref().is_some_and(|f| f.id.as_str() == "b")
    })
    .await;

    assert_eq!(repo.calls(Lookup::Details), 1);
    assert_eq!(loader.observe().files.len(), 1);
}

#[tokio::test]
async fn signing_out_discards_load_in_flight() {
    let repo = Arc::new(ScriptedRepository::new());
    let auth = Arc::new(SessionAuth::resolved_with(Some(user())));
    let loader = loader(&repo, &auth);
    assert!(loader.start().await.is_committed());

    repo.hold("a");
    let pending = tokio::spawn(loader.navigate(NavigationKey::folder("a")));
    eventually(|| repo.calls(Lookup::Details) == 1).await;

    auth.sign_out();
    eventually(|| !loader.observe().is_loading).await;

    repo.release("a");
    assert_eq!(pending.await.unwrap(), LoadOutcome::Superseded(2));

    let view = loader.observe();
    assert!(!view.is_loading);
    assert!(view.is_empty());
    assert_eq!(loader.current_key(), NavigationKey::folder("a"));
}

#[tokio::test]
async fn switching_user_reloads_current_folder() {
    let repo = Arc::new(ScriptedRepository::new());
    let auth = Arc::new(SessionAuth::resolved_with(Some(user())));
    let loader = loader(&repo, &auth);
    assert!(loader.start().await.is_committed());
    assert!(loader.navigate(NavigationKey::folder("a")).await.is_committed());

    auth.resolve(Some(named_user("u2", "olek")));
    eventually(|| repo.calls(Lookup::Details) == 2 && !loader.observe().is_loading).await;

    let view = loader.observe();
    assert_eq!(view.operation_id, 3);
    assert_eq!(view.folder.unwrap().id.as_str(), "a");
}

#[tokio::test]
async fn signing_out_retires_in_flight_load() {
    let repo = Arc::new(ScriptedRepository::new());
    repo.hold("a");
    let auth = Arc::new(SessionAuth::resolved_with(Some(user())));
    let loader = loader(&repo, &auth);

    let pending = tokio::spawn(loader.navigate(NavigationKey::folder("a")));

    auth.sign_out();
    assert_eq!(loader.refresh().await, LoadOutcome::NotAuthenticated);

    repo.release("a");
    assert_eq!(pending.await.unwrap(), LoadOutcome::Superseded(1));

    let view = loader.observe();
    assert!(!view.is_loading);
    assert!(view.is_empty());
}
