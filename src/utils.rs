use std::{cmp::Ordering, collections::HashSet, time::Duration};

use chrono::{DateTime, Timelike, Utc};

use crate::{
    crawler::CrawlResults,
    types::{Album, AlbumTrackPair},
};

pub fn remove_duplicate_albums(albums: &mut Vec<Album>) {
    let mut seen_ids = HashSet::new();
    albums.retain(|album| seen_ids.insert(album.id.clone()));
}

/// Oldest release first, then by first artist, so playlists read chronologically.
pub fn sort_album_track_pairs(album_track_pairs: &mut [AlbumTrackPair]) {
    album_track_pairs.sort_by(|a, b| match a.album.release_date.cmp(&b.album.release_date) {
        Ordering::Equal => a
            .album
            .first_artist_name()
            .cmp(b.album.first_artist_name())
            .then_with(|| a.album.name.cmp(&b.album.name)),
        other => other,
    });
}

/// A one-line summary of a crawl, `None` if no songs were added.
///
/// ```text
/// 8 new songs added! [Album: 3 / EP: 5]
/// ```
pub fn compile_result_string(results: &CrawlResults) -> Option<String> {
    let total: usize = results.values().sum();
    if total == 0 {
        return None;
    }

    let per_group = results
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(group, count)| format!("{}: {}", group.label(), count))
        .collect::<Vec<_>>()
        .join(" / ");

    Some(format!(
        "{total} new song{plural} added! [{per_group}]",
        plural = if total == 1 { "" } else { "s" }
    ))
}

/// Time until the next crawl slot. Slots repeat every hour at the minutes
/// `offset, offset + interval, ...` below 60, like the cron pattern
/// `0 offset/interval * * * *`. For an interval of 25 and an offset of 1 that is
/// `:01`, `:26` and `:51`.
pub fn next_crawl_delay(
    now: DateTime<Utc>,
    interval_minutes: u32,
    offset_minutes: u32,
) -> Duration {
    let interval = interval_minutes.max(1);
    let offset = offset_minutes % 60;
    let is_slot = |minute: u32| minute >= offset && (minute - offset) % interval == 0;

    let minute = now.minute();
    if is_slot(minute) && now.second() == 0 && now.nanosecond() == 0 {
        return Duration::ZERO;
    }

    let minutes_ahead = (minute + 1..60)
        .find(|m| is_slot(*m))
        .map_or(60 + offset - minute, |m| m - minute);

    let elapsed_in_minute =
        Duration::from_secs(now.second() as u64) + Duration::from_nanos(now.nanosecond() as u64);
    Duration::from_secs(minutes_ahead as u64 * 60).saturating_sub(elapsed_in_minute)
}
