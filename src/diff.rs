//! Reporting of releases dropped between two filter stages.
//!
//! Purely observational: nothing in the crawl decides anything based on these
//! results. The difference is one-sided, releases that only exist in the
//! subtrahend are never reported.

use std::{cmp::Ordering, collections::HashSet};

use crate::{
    logging,
    types::{Album, AlbumTrackPair},
};

/// Releases of `base` whose id doesn't appear in `subtrahend`.
pub fn difference<'a>(
    base: impl IntoIterator<Item = &'a Album>,
    subtrahend: impl IntoIterator<Item = &'a Album>,
) -> HashSet<&'a Album> {
    let mut difference: HashSet<&Album> = base.into_iter().collect();
    for album in subtrahend {
        difference.remove(album);
    }
    difference
}

/// [`difference`] in presentation order.
pub fn sorted_difference<'a>(
    base: impl IntoIterator<Item = &'a Album>,
    subtrahend: impl IntoIterator<Item = &'a Album>,
) -> Vec<&'a Album> {
    let mut sorted: Vec<&Album> = difference(base, subtrahend).into_iter().collect();
    sorted.sort_by(|a, b| compare_albums(a, b));
    sorted
}

/// Base group, then release date, then first artist, then name. Releases without
/// a known group sort last.
pub fn compare_albums(a: &Album, b: &Album) -> Ordering {
    let group_key = |album: &Album| album.album_group().map_or(usize::MAX, |g| g as usize);
    group_key(a)
        .cmp(&group_key(b))
        .then_with(|| a.release_date.cmp(&b.release_date))
        .then_with(|| a.first_artist_name().cmp(b.first_artist_name()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// One line per release, e.g. `x [single] Artist - Name (2024-05-03)`.
pub fn pretty_album(album: &Album) -> String {
    format!(
        "x [{group}] {artist} - {name} ({date})",
        group = album.album_group.as_deref().unwrap_or("?"),
        artist = album.first_artist_name(),
        name = album.name,
        date = album.release_date
    )
}

/// Logs every release of `base` missing from `subtrahend`, preceded by
/// `description`. Logs nothing when nothing was dropped.
pub fn log_album_difference(base: &[Album], subtrahend: &[Album], description: &str) -> usize {
    let dropped = sorted_difference(base, subtrahend);
    if dropped.is_empty() {
        return 0;
    }

    tracing::debug!("{}", logging::truncate_to_ellipsis(description));
    for album in &dropped {
        tracing::debug!("{}", logging::truncate_to_ellipsis(&pretty_album(album)));
    }
    dropped.len()
}

pub fn log_album_track_pair_difference(
    base: &[AlbumTrackPair],
    subtrahend: &[AlbumTrackPair],
    description: &str,
) -> usize {
    let base: Vec<Album> = base.iter().map(|atp| atp.album.clone()).collect();
    let subtrahend: Vec<Album> = subtrahend.iter().map(|atp| atp.album.clone()).collect();
    log_album_difference(&base, &subtrahend, description)
}
