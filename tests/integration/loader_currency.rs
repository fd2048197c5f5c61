use std::sync::Arc;

use folio::auth::SessionAuth;
use folio::loader::{ContentLoader, LoadOutcome};
use folio::navigation::{FilterSpec, NavigationKey, SortBy, SortOrder};
use proptest::prelude::*;

use crate::support::{eventually, user, Lookup, ScriptedRepository, ROOT};

fn loader(repo: &Arc<ScriptedRepository>) -> ContentLoader {
    ContentLoader::new(
        repo.clone(),
        repo.clone(),
        Arc::new(SessionAuth::resolved_with(Some(user()))),
    )
}

#[tokio::test]
async fn later_navigation_wins_when_earlier_resolves_last() {
    let repo = Arc::new(ScriptedRepository::new());
    repo.hold("a");
    repo.hold("b");
    let loader = loader(&repo);

    let first = tokio::spawn(loader.navigate(NavigationKey::folder("a")));
    let second = tokio::spawn(loader.navigate(NavigationKey::folder("b")));

    repo.release("b");
    assert_eq!(second.await.unwrap(), LoadOutcome::Committed(2));
    repo.release("a");
    assert_eq!(first.await.unwrap(), LoadOutcome::Superseded(1));

    let view = loader.observe();
    assert!(!view.is_loading);
    assert_eq!(view.operation_id, 2);
    assert_eq!(view.folder.unwrap().id.as_str(), "b");
    assert_eq!(view.subfolders[0].id.as_str(), "b1");
    assert_eq!(view.files[0].filename, "b-doc.pdf");
}

#[tokio::test]
async fn earlier_navigation_resolving_first_is_never_shown() {
    let repo = Arc::new(ScriptedRepository::new());
    repo.hold("a");
    repo.hold("b");
    let loader = loader(&repo);

    let first = tokio::spawn(loader.navigate(NavigationKey::folder("a")));
    let second = tokio::spawn(loader.navigate(NavigationKey::folder("b")));

    repo.release("a");
    assert_eq!(first.await.unwrap(), LoadOutcome::Superseded(1));

    let view = loader.observe();
    assert!(view.is_loading);
    assert!(view.folder.is_none());
    assert!(view.files.is_empty());
    assert!(view.subfolders.is_empty());

    repo.release("b");
    assert_eq!(second.await.unwrap(), LoadOutcome::Committed(2));
    assert_eq!(loader.observe().folder.unwrap().id.as_str(), "b");
}

#[tokio::test]
async fn load_superseded_mid_flight_is_dropped_when_it_settles_last() {
    let repo = Arc::new(ScriptedRepository::new());
    repo.hold("a");
    repo.hold("b");
    let loader = loader(&repo);

    let first = tokio::spawn(loader.navigate(NavigationKey::folder("a")));
    eventually(|| repo.calls(Lookup::Details) == 1).await;
    assert_eq!(repo.calls(Lookup::Files), 1);

    let second = tokio::spawn(loader.navigate(NavigationKey::folder("b")));
    repo.release("b");
    assert_eq!(second.await.unwrap(), LoadOutcome::Committed(2));
    repo.release("a");
    assert_eq!(first.await.unwrap(), LoadOutcome::Superseded(1));

    let view = loader.observe();
    assert!(!view.is_loading);
    assert_eq!(view.operation_id, 2);
    assert_eq!(view.folder.unwrap().id.as_str(), "b");
}

#[tokio::test]
async fn load_superseded_mid_flight_is_dropped_when_it_settles_first() {
    let repo = Arc::new(ScriptedRepository::new());
    repo.hold("a");
    repo.hold("b");
    let loader = loader(&repo);

    let first = tokio::spawn(loader.navigate(NavigationKey::folder("a")));
    eventually(|| repo.calls(Lookup::Details) == 1).await;

    let second = tokio::spawn(loader.navigate(NavigationKey::folder("b")));
    repo.release("a");
    assert_eq!(first.await.unwrap(), LoadOutcome::Superseded(1));

    let view = loader.observe();
    assert!(view.is_loading);
    assert!(view.folder.is_none());
    assert!(view.subfolders.is_empty());
    assert!(view.files.is_empty());

    repo.release("b");
    assert_eq!(second.await.unwrap(), LoadOutcome::Committed(2));
    assert_eq!(loader.observe().folder.unwrap().id.as_str(), "b");
}

#[tokio::test]
async fn navigating_back_shows_the_revisited_folder() {
    let repo = Arc::new(ScriptedRepository::new());
    repo.hold("a");
    repo.hold("b");
    let loader = loader(&repo);

    let forward = tokio::spawn(loader.navigate(NavigationKey::folder("a")));
    let sideways = tokio::spawn(loader.navigate(NavigationKey::folder("b")));
    let back = tokio::spawn(loader.navigate(NavigationKey::folder("a")));

    repo.release("b");
    assert_eq!(sideways.await.unwrap(), LoadOutcome::Superseded(2));
    repo.release("a");
    assert_eq!(forward.await.unwrap(), LoadOutcome::Superseded(1));
    assert_eq!(back.await.unwrap(), LoadOutcome::Committed(3));

    let view = loader.observe();
    assert_eq!(view.operation_id, 3);
    assert_eq!(view.folder.unwrap().id.as_str(), "a");
}

#[tokio::test]
async fn changing_folder_clears_previous_content_immediately() {
    let repo = Arc::new(ScriptedRepository::new());
    let loader = loader(&repo);
    loader.navigate(NavigationKey::folder("a")).await;
    assert_eq!(loader.observe().files.len(), 1);

    repo.hold("b");
    let pending = tokio::spawn(loader.navigate(NavigationKey::folder("b")));

    let view = loader.observe();
    assert!(view.is_loading);
    assert!(view.folder.is_none());
    assert!(view.subfolders.is_empty());
    assert!(view.files.is_empty());

    repo.release("b");
    assert!(pending.await.unwrap().is_committed());
    let view = loader.observe();
    assert!(view
        .subfolders
        .iter()
        .all(|f| f.parent_folder.as_ref().map(|p| p.as_str()) == Some("b")));
    assert!(view
        .files
        .iter()
        .all(|f| f.folder.as_ref().map(|p| p.as_str()) == Some("b")));
}

#[tokio::test]
async fn filter_change_keeps_content_until_new_listing_lands() {
    let repo = Arc::new(ScriptedRepository::new());
    let loader = loader(&repo);
    loader.navigate(NavigationKey::folder("a")).await;

    repo.hold("a");
    let filters = FilterSpec::default()
        .with_search("q3")
        .sorted(SortBy::Name, SortOrder::Asc);
    let key = NavigationKey::folder("a").with_filters(filters.clone());
    let pending = tokio::spawn(loader.navigate(key));

    let view = loader.observe();
    assert!(view.is_loading);
    assert_eq!(view.folder.unwrap().id.as_str(), "a");
    assert_eq!(view.files.len(), 1);

    repo.release("a");
    assert_eq!(pending.await.unwrap(), LoadOutcome::Committed(2));
    assert_eq!(repo.last_filters(), Some(filters));
}

#[tokio::test]
async fn refresh_reloads_same_content_as_new_operation() {
    let repo = Arc::new(ScriptedRepository::new());
    let loader = loader(&repo);
    loader.navigate(NavigationKey::folder("a")).await;
    let before = loader.observe();

    assert_eq!(loader.refresh().await, LoadOutcome::Committed(2));
    let after = loader.observe();

    assert_eq!(after.operation_id, before.operation_id + 1);
    assert_eq!(after.folder, before.folder);
    assert_eq!(after.subfolders, before.subfolders);
    assert_eq!(after.files, before.files);
    assert_eq!(after.errors, before.errors);
    assert_eq!(repo.calls(Lookup::Details), 2);
    assert_eq!(repo.calls(Lookup::Files), 2);
}

#[tokio::test]
async fn refresh_supersedes_in_flight_load() {
    let repo = Arc::new(ScriptedRepository::new());
    repo.hold("a");
    let loader = loader(&repo);

    let first = tokio::spawn(loader.navigate(NavigationKey::folder("a")));
    let again = tokio::spawn(loader.refresh());

    repo.release("a");
    assert_eq!(first.await.unwrap(), LoadOutcome::Superseded(1));
    assert_eq!(again.await.unwrap(), LoadOutcome::Committed(2));
}

#[tokio::test]
async fn root_lists_top_level_folders_without_files() {
    let repo = Arc::new(ScriptedRepository::new());
    let loader = loader(&repo);

    assert!(loader.navigate(NavigationKey::root()).await.is_committed());

    let view = loader.observe();
    assert!(view.folder.is_none());
    assert!(view.files.is_empty());
    assert!(view.errors.is_empty());
    let names: Vec<_> = view.subfolders.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(repo.calls(Lookup::Details), 0);
    assert_eq!(repo.calls(Lookup::Files), 0);
}

#[tokio::test]
async fn subscribers_only_see_current_snapshots() {
    let repo = Arc::new(ScriptedRepository::new());
    repo.hold("a");
    repo.hold(ROOT);
    let loader = loader(&repo);
    let mut rx = loader.subscribe();

    let stale = tokio::spawn(loader.navigate(NavigationKey::folder("a")));
    let current = tokio::spawn(loader.navigate(NavigationKey::root()));

    repo.release("a");
    stale.await.unwrap();
    repo.release(ROOT);
    current.await.unwrap();

    rx.changed().await.unwrap();
    let view = rx.borrow().clone();
    assert_eq!(view.operation_id, 2);
    assert!(view.folder.is_none());
    assert_eq!(view.subfolders.len(), 3);
}

const FOLDERS: [&str; 4] = ["a", "b", "c", "a1"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn last_navigation_wins_under_any_completion_order(
        order in Just(vec![0usize, 1, 2, 3]).prop_shuffle(),
        navigations in 1usize..=4,
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let (outcomes, view) = runtime.block_on(async {
            let repo = Arc::new(ScriptedRepository::new());
            for id in FOLDERS {
                repo.hold(id);
            }
            let loader = loader(&repo);

            let mut handles: Vec<_> = FOLDERS[..navigations]
                .iter()
                .map(|id| Some(tokio::spawn(loader.navigate(NavigationKey::folder(*id)))))
                .collect();

            let mut outcomes = vec![None; navigations];
            for index in order.iter().copied().filter(|i| *i < navigations) {
                repo.release(FOLDERS[index]);
                if let Some(handle) = handles[index].take() {
                    outcomes[index] = Some(handle.await.unwrap());
                }
            }
            (outcomes, loader.observe())
        });

        let last = navigations - 1;
        for (index, outcome) in outcomes.iter().enumerate() {
            let id = index as u64 + 1;
            let expected = if index == last {
                LoadOutcome::Committed(id)
            } else {
                LoadOutcome::Superseded(id)
            };
            prop_assert_eq!(*outcome, Some(expected));
        }
        prop_assert!(!view.is_loading);
        prop_assert_eq!(view.operation_id, navigations as u64);
        prop_assert_eq!(view.folder.map(|f| f.id.to_string()), Some(FOLDERS[last].to_string()));
    }
}
