//! Library page behavior against a live store.

#![allow(clippy::unwrap_used)]

mod common;

use common::Harness;
use comixed_frontend::components::LibraryPage;
use comixed_frontend::mocks::{InMemoryComicService, InMemoryUserService, Navigation, ScriptedConfirmation};
use comixed_frontend::models::LibraryUpdate;
use comixed_frontend::services::Confirmation;
use comixed_frontend::state::LibraryFilter;
use comixed_frontend::{fixtures, AppAction, AuthAction, LibraryAction, LibraryFilterAction, ScrapingAction, SelectionAction};
use comixed_testing::ActionRecorder;
use std::time::Duration;

async fn loaded_page(harness: &Harness) -> LibraryPage {
    let mut page = LibraryPage::new(harness.store.clone(), &harness.collaborators, &harness.config);
    page.init().await.unwrap();
    harness
        .store
        .send(
            LibraryAction::UpdatesReceived {
                update: LibraryUpdate {
                    comics: fixtures::comics(),
                    ..LibraryUpdate::default()
                },
            }
            .into(),
        )
        .await
        .unwrap();
    page
}

#[tokio::test]
async fn init_mirrors_slices_and_sets_up_scraping() {
    let harness = Harness::new(
        InMemoryComicService::new(),
        InMemoryUserService::new().with_user(fixtures::user_admin()),
        ScriptedConfirmation::accepting(),
    );
    harness
        .store
        .send(AuthAction::UserLoaded { user: fixtures::user_admin() }.into())
        .await
        .unwrap();
    let mut recorder = ActionRecorder::attach(&harness.store);

    let mut page = LibraryPage::new(harness.store.clone(), &harness.collaborators, &harness.config);
    page.init().await.unwrap();

    assert_eq!(
        recorder.drain(),
        vec![AppAction::Scraping(ScrapingAction::Setup {
            api_key: "1234567890ABCDEF".to_string()
        })]
    );
    let view = page.view();
    assert_eq!(view.user, Some(fixtures::user_admin()));
    assert_eq!(view.scraping.map(|scraping| scraping.api_key), Some("1234567890ABCDEF".to_string()));
    assert!(view.library.is_some());
    assert!(view.selection.is_some());
    assert_eq!(view.filter, Some(LibraryFilter::default()));
}

#[tokio::test]
async fn init_without_user_sets_up_with_empty_key() {
    let harness = Harness::accepting();
    let mut recorder = ActionRecorder::attach(&harness.store);

    let mut page = LibraryPage::new(harness.store.clone(), &harness.collaborators, &harness.config);
    page.init().await.unwrap();

    assert_eq!(
        recorder.drain(),
        vec![AppAction::Scraping(ScrapingAction::Setup { api_key: String::new() })]
    );
}

#[tokio::test]
async fn library_updates_reach_the_view() {
    let harness = Harness::accepting();
    let page = loaded_page(&harness).await;

    assert_eq!(page.view().comics, fixtures::comics());
}

#[tokio::test]
async fn delete_comic_accepted_dispatches_once() {
    let harness = Harness::accepting();
    let page = loaded_page(&harness).await;
    let mut recorder = ActionRecorder::attach(&harness.store);

    let mut handle = page.delete_comic(fixtures::comic(3)).await.unwrap().unwrap();
    handle.wait().await;

    let removals: Vec<AppAction> = recorder
        .drain()
        .into_iter()
        .filter(|action| matches!(action, AppAction::Library(LibraryAction::RemoveComic { .. })))
        .collect();
    assert_eq!(
        removals,
        vec![AppAction::Library(LibraryAction::RemoveComic {
            comic: fixtures::comic(3)
        })]
    );
    assert!(page.view().comics.iter().all(|comic| comic.id != 3));
}

#[tokio::test]
async fn delete_comic_declined_dispatches_nothing() {
    let harness = Harness::new(
        InMemoryComicService::new(),
        InMemoryUserService::new(),
        ScriptedConfirmation::declining(),
    );
    let page = loaded_page(&harness).await;
    let mut recorder = ActionRecorder::attach(&harness.store);

    let outcome = page.delete_comic(fixtures::comic(3)).await.unwrap();

    assert!(outcome.is_none());
    assert!(recorder.drain().is_empty());
    assert!(harness.comics.calls().is_empty());
}

#[tokio::test]
async fn delete_comic_asks_with_translated_keys() {
    let harness = Harness::accepting();
    let page = loaded_page(&harness).await;

    let _ = page.delete_comic(fixtures::comic(1)).await.unwrap();

    let request = &harness.confirmation.requests()[0];
    assert_eq!(request.header, "library.messages.delete-comic-title");
    assert_eq!(request.message, "library.messages.delete-comic-question");
    assert_eq!(request.icon.as_deref(), Some("fa fa-exclamation"));
}

#[tokio::test]
async fn rescan_accepted_sends_last_comic_date_and_timeout() {
    let harness = Harness::accepting();
    let page = loaded_page(&harness).await;
    let mut recorder = ActionRecorder::attach(&harness.store);

    page.rescan_library().await.unwrap();

    let rescans: Vec<AppAction> = recorder
        .drain()
        .into_iter()
        .filter(|action| matches!(action, AppAction::Library(LibraryAction::RescanFiles { .. })))
        .collect();
    assert_eq!(
        rescans,
        vec![AppAction::Library(LibraryAction::RescanFiles {
            last_comic_date: fixtures::comic(5).last_updated_date,
            timeout: Duration::from_millis(60_000),
        })]
    );
    let request = &harness.confirmation.requests()[0];
    assert_eq!(request.header, "library.messages.rescan-library-title");
    assert_eq!(request.message, "library.messages.rescan-library-message");
}

#[tokio::test]
async fn rescan_declined_dispatches_nothing() {
    let harness = Harness::accepting();
    let page = loaded_page(&harness).await;
    harness.confirmation.set_answer(Confirmation::Declined);
    let mut recorder = ActionRecorder::attach(&harness.store);

    assert!(page.rescan_library().await.unwrap().is_none());
    assert!(recorder.drain().is_empty());
}

#[tokio::test]
async fn can_rescan_only_when_nothing_is_pending() {
    let harness = Harness::accepting();
    let page = loaded_page(&harness).await;

    for (rescan_count, import_count, expected) in [(0, 0, true), (0, 1, false), (1, 0, false)] {
        harness
            .store
            .send(
                LibraryAction::UpdatesReceived {
                    update: LibraryUpdate {
                        comics: Vec::new(),
                        rescan_count,
                        import_count,
                    },
                }
                .into(),
            )
            .await
            .unwrap();

        assert_eq!(
            page.can_rescan(),
            expected,
            "rescan_count={rescan_count} import_count={import_count}"
        );
    }
}

#[tokio::test]
async fn can_rescan_is_false_before_init() {
    let harness = Harness::accepting();
    let page = LibraryPage::new(harness.store.clone(), &harness.collaborators, &harness.config);

    assert!(!page.can_rescan());
}

#[tokio::test]
async fn changed_filter_is_adopted() {
    let harness = Harness::accepting();
    let page = loaded_page(&harness).await;
    let filter = LibraryFilter {
        search_text: "batman".to_string(),
        ..LibraryFilter::default()
    };

    harness
        .store
        .send(LibraryFilterAction::ChangeFilter { filter }.into())
        .await
        .unwrap();

    let held = page.view().filter.unwrap();
    assert_eq!(held.search_text, "batman");
    assert!(held.changed);
}

#[tokio::test]
async fn open_comic_navigates_to_reader() {
    let harness = Harness::accepting();
    let page = loaded_page(&harness).await;

    page.open_comic(&fixtures::comic(3));

    assert_eq!(
        harness.router.navigations(),
        vec![Navigation::Commands(vec!["comics".to_string(), "3".to_string()])]
    );
}

#[tokio::test]
async fn destroy_releases_every_subscription() {
    let harness = Harness::accepting();
    let before = harness.store.subscriber_count();

    let mut page = loaded_page(&harness).await;
    assert_eq!(page.subscription_count(), 5);
    assert_eq!(harness.store.subscriber_count(), before + 5);

    page.destroy();

    assert_eq!(page.subscription_count(), 0);
    assert_eq!(harness.store.subscriber_count(), before);
}

#[tokio::test]
async fn destroyed_page_ignores_later_changes() {
    let harness = Harness::accepting();
    let mut page = loaded_page(&harness).await;
    page.destroy();

    harness
        .store
        .send(
            SelectionAction::SelectComics {
                comics: fixtures::comics(),
            }
            .into(),
        )
        .await
        .unwrap();

    assert!(page.view().selected_comics.is_empty());
}

#[tokio::test]
async fn dropping_the_page_releases_subscriptions() {
    let harness = Harness::accepting();
    let page = loaded_page(&harness).await;
    assert_eq!(harness.store.subscriber_count(), 5);

    drop(page);

    assert_eq!(harness.store.subscriber_count(), 0);
}

#[tokio::test]
async fn reinit_does_not_stack_subscriptions() {
    let harness = Harness::accepting();
    let mut page = loaded_page(&harness).await;

    page.init().await.unwrap();

    assert_eq!(harness.store.subscriber_count(), 5);
}
