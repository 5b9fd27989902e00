//! Demo binary
//!
//! Drives the library page, the page details panel and the comic list
//! toolbar against in-memory collaborators, then prints the collected
//! metrics.
//!
//! ```text
//! cargo run --bin comixed-demo -- [config.json]
//! ```

use anyhow::Context;
use comixed_core::environment::SystemClock;
use comixed_frontend::adaptors::{AuthenticationAdaptor, LibraryAdaptor, SelectionAdaptor};
use comixed_frontend::components::{Collaborators, ComicListToolbar, LibraryPage, PageDetails};
use comixed_frontend::mocks::{
    InMemoryComicService, InMemoryUserService, MapTranslator, RecordingNotifier, RecordingRouter,
    ScriptedConfirmation,
};
use comixed_frontend::models::LibraryUpdate;
use comixed_frontend::{build_store, fixtures, AppEnvironment, FrontendConfig};
use comixed_runtime::metrics::MetricsRecorder;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => FrontendConfig::from_file(&path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => FrontendConfig::default(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let metrics = MetricsRecorder::install().context("installing metrics recorder")?;

    println!("=== ComixEd front-end demo ===\n");

    let comics = InMemoryComicService::new()
        .with_page_types(fixtures::page_types())
        .with_library_update(LibraryUpdate {
            comics: fixtures::comics(),
            rescan_count: 0,
            import_count: 0,
        })
        .with_rescan_count(3);
    let users = InMemoryUserService::new().with_user(fixtures::user_admin());
    let notifier = RecordingNotifier::new();
    let router = RecordingRouter::new();
    let translate = MapTranslator::new()
        .with("library.messages.delete-comic-title", "Delete Comic")
        .with("library.messages.delete-comic-question", "Are you sure you want to delete this comic?")
        .with("library.messages.rescan-library-title", "Rescan Library")
        .with("library.messages.rescan-library-message", "Rescan every file changed since the last update?")
        .with("library.messages.start-scraping-title", "Scrape Comics")
        .with("library.messages.start-scraping-question", "Scrape the selected comics?");

    let environment = AppEnvironment::new(
        Arc::new(comics.clone()),
        Arc::new(users.clone()),
        Arc::new(notifier.clone()),
        Arc::new(SystemClock),
    );
    let collaborators = Collaborators {
        comics: Arc::new(comics.clone()),
        users: Arc::new(users),
        confirmation: Arc::new(ScriptedConfirmation::accepting()),
        translate: Arc::new(translate),
        notifier: Arc::new(notifier.clone()),
        router: Arc::new(router.clone()),
    };
    let store = build_store(environment, &config);

    let auth = AuthenticationAdaptor::new(store.clone());
    auth.check_state().await?.wait().await;
    println!("Authenticated: {}", auth.is_authenticated().await);

    let mut page = LibraryPage::new(store.clone(), &collaborators, &config);
    page.init().await?;

    let library = LibraryAdaptor::new(store.clone());
    library
        .get_updates(chrono::DateTime::default(), config.updates_timeout)
        .await?
        .wait()
        .await;
    let view = page.view();
    println!("Comics on the library page: {}", view.comics.len());
    println!("Rescan allowed: {}", page.can_rescan());

    if let Some(mut handle) = page.delete_comic(fixtures::comic(5)).await? {
        handle.wait().await;
    }
    if let Some(mut handle) = page.rescan_library().await? {
        handle.wait().await;
    }
    let view = page.view();
    println!(
        "After delete and rescan: {} comics, {} queued for rescan",
        view.comics.len(),
        view.library.map_or(0, |library| library.library_contents.rescan_count)
    );
    page.open_comic(&fixtures::comic(1));

    let selection = SelectionAdaptor::new(store.clone());
    selection.select_comics(fixtures::comics()).await?;
    let mut toolbar = ComicListToolbar::new(store.clone(), &collaborators);
    toolbar.set_selected_comics(page.view().selected_comics);
    toolbar.start_scraping().await?;
    let scraping = store.state(|state| state.scraping.clone()).await;
    println!(
        "Scraping {} comics with key {:?}",
        scraping.comics.len(),
        scraping.api_key
    );

    let mut details = PageDetails::new(fixtures::page(), &collaborators);
    details.init().await;
    details.set_page_type(fixtures::page_type_front_cover()).await;
    details.delete_page().await;
    println!(
        "Page {} is now {} and {}",
        details.title(),
        details.display_name_for(&details.page().page_type),
        if details.page().deleted { "deleted" } else { "kept" }
    );

    page.destroy();
    println!("Navigations: {:?}", router.navigations());
    println!("Error toasts: {:?}", notifier.errors());

    store
        .shutdown(config.shutdown_timeout)
        .await
        .context("shutting down the store")?;

    if let Some(rendered) = metrics.render() {
        println!("\n=== Metrics ===\n{rendered}");
    }

    Ok(())
}
