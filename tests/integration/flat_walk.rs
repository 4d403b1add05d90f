//! Walk semantics for a flat (movie-like) provider

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use servarr_upgrade_searcher::provider::{MovieProvider, ProviderResult};
use servarr_upgrade_searcher::resume::ResumeStore;
use servarr_upgrade_searcher::walker::{walk_movies, SearchDispatcher, WalkStatus};
use servarr_upgrade_searcher::shutdown::ShutdownCoordinator;
use servarr_upgrade_searcher::Movie;
use tempfile::TempDir;

/// Scripted movie library recording which ids were searched
struct MockMovieProvider {
    movies: Vec<Movie>,
    searched: Arc<Mutex<Vec<u64>>>,
}

impl MockMovieProvider {
    fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies,
            searched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn searched(&self) -> Vec<u64> {
        self.searched.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieProvider for MockMovieProvider {
    async fn list_movies(&self) -> ProviderResult<Vec<Movie>> {
        Ok(self.movies.clone())
    }

    async fn search_movie(&self, id: u64) -> ProviderResult<()> {
        self.searched.lock().unwrap().push(id);
        Ok(())
    }
}

fn movie(id: u64, monitored: bool) -> Movie {
    Movie {
        id,
        title: format!("Movie {id}"),
        monitored,
    }
}

fn fresh_store(dir: &TempDir) -> ResumeStore {
    ResumeStore::open(dir.path().join("upgrade.resume")).unwrap()
}

#[tokio::test]
async fn test_walk_starts_at_the_stored_index_never_earlier() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("upgrade.resume");
    std::fs::write(&path, "radarr,1\n").unwrap();

    let provider = MockMovieProvider::new(vec![
        movie(10, true),
        movie(11, true),
        movie(12, true),
    ]);
    let mut store = ResumeStore::open(&path).unwrap();
    let mut dispatcher = SearchDispatcher::new(50, Duration::ZERO);

    let status = walk_movies(&provider, "radarr", &mut dispatcher, &mut store)
        .await
        .unwrap();

    assert_eq!(status, WalkStatus::Completed);
    assert_eq!(provider.searched(), vec![11, 12]);
}

#[tokio::test]
async fn test_budget_halts_the_walk_and_the_halted_item_is_retried_next_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("upgrade.resume");

    let provider = MockMovieProvider::new(vec![
        movie(1, true),
        movie(2, true),
        movie(3, true),
    ]);

    {
        let mut store = ResumeStore::open(&path).unwrap();
        let mut dispatcher = SearchDispatcher::new(2, Duration::ZERO);
        let status = walk_movies(&provider, "radarr", &mut dispatcher, &mut store)
            .await
            .unwrap();

        assert_eq!(status, WalkStatus::BudgetExhausted);
        assert_eq!(dispatcher.issued(), 2);
        assert_eq!(provider.searched(), vec![1, 2]);
        // Cursor points past the last completed item
        assert_eq!(store.flat_cursor("radarr").unwrap().top, 2);
    }

    // A fresh run with a fresh budget picks up at the third movie
    let mut store = ResumeStore::open(&path).unwrap();
    let mut dispatcher = SearchDispatcher::new(50, Duration::ZERO);
    let status = walk_movies(&provider, "radarr", &mut dispatcher, &mut store)
        .await
        .unwrap();

    assert_eq!(status, WalkStatus::Completed);
    assert_eq!(provider.searched(), vec![1, 2, 3]);
    assert_eq!(store.flat_cursor("radarr").unwrap().top, 3);
}

#[tokio::test]
async fn test_unmonitored_movies_advance_without_searching_or_spending_budget() {
    let dir = TempDir::new().unwrap();
    let provider = MockMovieProvider::new(vec![
        movie(1, true),
        movie(2, false),
        movie(3, true),
    ]);
    let mut store = fresh_store(&dir);
    let mut dispatcher = SearchDispatcher::new(50, Duration::ZERO);

    let status = walk_movies(&provider, "radarr", &mut dispatcher, &mut store)
        .await
        .unwrap();

    assert_eq!(status, WalkStatus::Completed);
    assert_eq!(provider.searched(), vec![1, 3]);
    assert_eq!(dispatcher.issued(), 2);
    assert_eq!(store.flat_cursor("radarr").unwrap().top, 3);
}

#[tokio::test]
async fn test_two_movie_end_to_end_scenario() {
    // Empty store, one monitored and one unmonitored movie, ample budget
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("upgrade.resume");
    let provider = MockMovieProvider::new(vec![movie(1, true), movie(2, false)]);
    let mut store = ResumeStore::open(&path).unwrap();
    let mut dispatcher = SearchDispatcher::new(10, Duration::ZERO);

    let status = walk_movies(&provider, "radarr", &mut dispatcher, &mut store)
        .await
        .unwrap();

    assert_eq!(status, WalkStatus::Completed);
    assert_eq!(provider.searched(), vec![1]);
    // The skip path still advanced and persisted
    assert_eq!(store.flat_cursor("radarr").unwrap().top, 2);
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("radarr,2"));
}

#[tokio::test]
async fn test_shutdown_request_halts_with_the_cursor_already_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("upgrade.resume");
    std::fs::write(&path, "radarr,1\n").unwrap();

    let shutdown = ShutdownCoordinator::shared();
    shutdown.request_shutdown();

    let provider = MockMovieProvider::new(vec![movie(1, true), movie(2, true)]);
    let mut store = ResumeStore::open(&path).unwrap();
    let mut dispatcher = SearchDispatcher::new(50, Duration::ZERO).with_shutdown(shutdown);

    let status = walk_movies(&provider, "radarr", &mut dispatcher, &mut store)
        .await
        .unwrap();

    assert_eq!(status, WalkStatus::Interrupted);
    assert!(provider.searched().is_empty());
    // Cursor untouched by the halt
    assert_eq!(store.flat_cursor("radarr").unwrap().top, 1);
}

#[tokio::test]
async fn test_empty_library_completes_and_records_the_tag() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("upgrade.resume");
    let provider = MockMovieProvider::new(Vec::new());
    let mut store = ResumeStore::open(&path).unwrap();
    let mut dispatcher = SearchDispatcher::new(10, Duration::ZERO);

    let status = walk_movies(&provider, "radarr", &mut dispatcher, &mut store)
        .await
        .unwrap();

    assert_eq!(status, WalkStatus::Completed);
    assert!(provider.searched().is_empty());
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("radarr,0"));
}
