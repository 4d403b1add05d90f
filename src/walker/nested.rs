//! Nested walk over a series-like library
//!
//! For each series: sweep its seasons, then its episodes, then issue the
//! series-level search. The season and episode cursors reset to zero as
//! soon as their sweep drains, so a completed sweep never re-triggers on
//! resume. The series cursor advances only after the series-level search,
//! which means a run halted exactly there will re-run both sweeps on
//! resume before retrying the series search. That duplication is accepted:
//! avoiding it would need an extra cursor field recording that the
//! series-level search already went out.

use tracing::{debug, info};

use super::dispatch::{DispatchOutcome, SearchDispatcher};
use super::{WalkError, WalkStatus};
use crate::provider::SeriesProvider;
use crate::resume::ResumeStore;

/// Per-level feature toggles for a nested walk.
///
/// Disabling a level suppresses its searches without affecting traversal:
/// indices still advance and persist as if the items were unmonitored.
#[derive(Debug, Clone, Copy)]
pub struct SeriesWalkOptions {
    /// Issue season-level searches
    pub search_seasons: bool,
    /// Issue episode-level searches
    pub search_episodes: bool,
}

impl Default for SeriesWalkOptions {
    fn default() -> Self {
        Self {
            search_seasons: true,
            search_episodes: true,
        }
    }
}

/// Walk every series at or past the stored cursor.
pub async fn walk_series(
    provider: &dyn SeriesProvider,
    tag: &str,
    options: SeriesWalkOptions,
    dispatcher: &mut SearchDispatcher,
    store: &mut ResumeStore,
) -> Result<WalkStatus, WalkError> {
    info!(provider = tag, "starting to process series library");
    let series_list = provider.list_series().await?;
    let total = series_list.len();
    let mut cursor = store.nested_cursor(tag)?;
    debug!(
        provider = tag,
        resume_series = cursor.top,
        resume_season = cursor.group,
        resume_episode = cursor.leaf,
        total,
        "loaded cursor"
    );

    for (index, series) in series_list.iter().enumerate() {
        if index < cursor.top {
            debug!(index, resume_position = cursor.top, "skipping series before resume position");
            continue;
        }

        info!(
            title = %series.title,
            position = index + 1,
            total,
            issued = dispatcher.issued(),
            max = dispatcher.max(),
            "working on series"
        );

        // Season sweep
        let season_total = series.seasons.len();
        for (season_index, season) in series.seasons.iter().enumerate() {
            if season_index < cursor.group {
                debug!(season_index, resume_position = cursor.group, "skipping season before resume position");
                continue;
            }

            let eligible = season.monitored && options.search_seasons;
            if eligible {
                info!(season = season_index + 1, of = season_total, "searching for season");
            } else if !season.monitored {
                info!(season = season_index + 1, "not searching this season, not monitored");
            } else {
                debug!(season = season_index + 1, "season searches disabled, skipping");
            }

            let outcome = dispatcher
                .try_dispatch(eligible, || {
                    provider.search_season(series.id, season.season_number)
                })
                .await?;
            match outcome {
                DispatchOutcome::Executed | DispatchOutcome::Skipped => {
                    cursor.group = season_index + 1;
                    store.persist(tag, cursor)?;
                }
                DispatchOutcome::BudgetExhausted => return Ok(WalkStatus::BudgetExhausted),
                DispatchOutcome::Interrupted => return Ok(WalkStatus::Interrupted),
            }
        }
        cursor.group = 0;
        store.persist(tag, cursor)?;

        // Episode sweep
        let episodes = provider.list_episodes(series.id).await?;
        let episode_total = episodes.len();
        for (episode_index, episode) in episodes.iter().enumerate() {
            if episode_index < cursor.leaf {
                debug!(episode_index, resume_position = cursor.leaf, "skipping episode before resume position");
                continue;
            }

            let eligible = episode.monitored && options.search_episodes;
            if eligible {
                info!(episode = episode_index + 1, of = episode_total, "searching for episode");
            } else if !episode.monitored {
                info!(episode = episode_index + 1, "not searching this episode, not monitored");
            } else {
                debug!(episode = episode_index + 1, "episode searches disabled, skipping");
            }

            let outcome = dispatcher
                .try_dispatch(eligible, || provider.search_episode(episode.id))
                .await?;
            match outcome {
                DispatchOutcome::Executed | DispatchOutcome::Skipped => {
                    cursor.leaf = episode_index + 1;
                    store.persist(tag, cursor)?;
                }
                DispatchOutcome::BudgetExhausted => return Ok(WalkStatus::BudgetExhausted),
                DispatchOutcome::Interrupted => return Ok(WalkStatus::Interrupted),
            }
        }
        cursor.leaf = 0;
        store.persist(tag, cursor)?;

        // Series-level search, only after both sweeps drained
        let outcome = dispatcher
            .try_dispatch(series.monitored, || provider.search_series(series.id))
            .await?;
        match outcome {
            DispatchOutcome::Executed => {}
            DispatchOutcome::Skipped => {
                info!(title = %series.title, "not searching this series, not monitored");
            }
            DispatchOutcome::BudgetExhausted => return Ok(WalkStatus::BudgetExhausted),
            DispatchOutcome::Interrupted => return Ok(WalkStatus::Interrupted),
        }

        cursor.top = index + 1;
        store.persist(tag, cursor)?;
    }

    // Records the tag even for an empty or fully-resumed library
    store.persist(tag, cursor)?;
    info!(provider = tag, "finished processing series library");
    Ok(WalkStatus::Completed)
}
