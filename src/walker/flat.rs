//! Flat walk over a movie-like library

use tracing::{debug, info};

use super::dispatch::{DispatchOutcome, SearchDispatcher};
use super::{WalkError, WalkStatus};
use crate::provider::MovieProvider;
use crate::resume::ResumeStore;

/// Walk every movie at or past the stored cursor, dispatching one search
/// per monitored movie.
///
/// The cursor is persisted after every visited movie; a halt leaves it at
/// the movie that was about to be searched.
pub async fn walk_movies(
    provider: &dyn MovieProvider,
    tag: &str,
    dispatcher: &mut SearchDispatcher,
    store: &mut ResumeStore,
) -> Result<WalkStatus, WalkError> {
    info!(provider = tag, "starting to process movie library");
    let movies = provider.list_movies().await?;
    let total = movies.len();
    let mut cursor = store.flat_cursor(tag)?;
    debug!(provider = tag, resume_position = cursor.top, total, "loaded cursor");

    for (index, movie) in movies.iter().enumerate() {
        if index < cursor.top {
            debug!(index, resume_position = cursor.top, "skipping movie before resume position");
            continue;
        }

        info!(
            title = %movie.title,
            position = index + 1,
            total,
            issued = dispatcher.issued(),
            max = dispatcher.max(),
            "working on movie"
        );

        let outcome = dispatcher
            .try_dispatch(movie.monitored, || provider.search_movie(movie.id))
            .await?;
        match outcome {
            DispatchOutcome::Executed => {}
            DispatchOutcome::Skipped => {
                info!(title = %movie.title, "not searching this movie, not monitored");
            }
            DispatchOutcome::BudgetExhausted => return Ok(WalkStatus::BudgetExhausted),
            DispatchOutcome::Interrupted => return Ok(WalkStatus::Interrupted),
        }

        cursor.top = index + 1;
        store.persist(tag, cursor)?;
    }

    // Records the tag even for an empty or fully-resumed library
    store.persist(tag, cursor)?;
    info!(provider = tag, "finished processing movie library");
    Ok(WalkStatus::Completed)
}
