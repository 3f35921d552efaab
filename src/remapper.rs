//! Reclassification of releases into the finer extended groups.
//!
//! A [`Remapper`] is plain data: the group it files releases into, the groups a
//! release may currently be in to be eligible, and a predicate over the release.
//! The pipeline walks its remappers in registration order and the first one that
//! accepts a release wins. The built-in order is [`Live`](AlbumGroupExtended::Live),
//! [`Remix`](AlbumGroupExtended::Remix), [`Ep`](AlbumGroupExtended::Ep): a live EP
//! lands in the live playlist, a remix EP in the remix playlist.
//!
//! Predicates never fail. A release that lacks what a predicate looks at (no
//! tracks, no durations) just doesn't qualify.

use std::collections::BTreeMap;

use crate::{category::AlbumGroupExtended, types::AlbumTrackPair};

const EP_MIN_TRACKS: usize = 4;
const EP_MAX_TRACKS: usize = 6;
const EP_MIN_DURATION_MS: u64 = 20 * 60 * 1000;

const LIVE_MARKERS: [&str; 3] = ["live", "unplugged", "in concert"];
const REMIX_MARKERS: [&str; 2] = ["remix", "mix)"];

#[derive(Debug, Clone, Copy)]
pub struct Remapper {
    pub album_group: AlbumGroupExtended,
    pub allowed_sources: &'static [AlbumGroupExtended],
    pub qualifies: fn(&AlbumTrackPair) -> bool,
}

impl Remapper {
    pub const LIVE: Remapper = Remapper {
        album_group: AlbumGroupExtended::Live,
        allowed_sources: &[AlbumGroupExtended::Album, AlbumGroupExtended::Single],
        qualifies: qualifies_as_live,
    };

    pub const REMIX: Remapper = Remapper {
        album_group: AlbumGroupExtended::Remix,
        allowed_sources: &[AlbumGroupExtended::Album, AlbumGroupExtended::Single],
        qualifies: qualifies_as_remix,
    };

    pub const EP: Remapper = Remapper {
        album_group: AlbumGroupExtended::Ep,
        allowed_sources: &[AlbumGroupExtended::Single],
        qualifies: qualifies_as_ep,
    };

    pub fn is_allowed_album_group(&self, group: AlbumGroupExtended) -> bool {
        self.allowed_sources.contains(&group)
    }

    pub fn qualifies_as_remappable(&self, atp: &AlbumTrackPair) -> bool {
        (self.qualifies)(atp)
    }

    fn accepts(&self, current: AlbumGroupExtended, atp: &AlbumTrackPair) -> bool {
        self.is_allowed_album_group(current) && self.qualifies_as_remappable(atp)
    }
}

#[derive(Debug, Clone)]
pub struct RemapperPipeline {
    remappers: Vec<Remapper>,
}

impl Default for RemapperPipeline {
    fn default() -> Self {
        Self::new(vec![Remapper::LIVE, Remapper::REMIX, Remapper::EP])
    }
}

impl RemapperPipeline {
    pub fn new(remappers: Vec<Remapper>) -> Self {
        Self { remappers }
    }

    /// Appends a remapper behind the registered ones.
    pub fn with(mut self, remapper: Remapper) -> Self {
        self.remappers.push(remapper);
        self
    }

    /// Keeps only remappers whose group has a destination, preserving order.
    pub fn restricted_to(&self, enabled: &[AlbumGroupExtended]) -> Self {
        Self {
            remappers: self
                .remappers
                .iter()
                .filter(|remapper| enabled.contains(&remapper.album_group))
                .copied()
                .collect(),
        }
    }

    pub fn remappers(&self) -> &[Remapper] {
        &self.remappers
    }

    /// The extended group for a release currently filed under `current`.
    pub fn classify(
        &self,
        current: AlbumGroupExtended,
        atp: &AlbumTrackPair,
    ) -> AlbumGroupExtended {
        self.remappers
            .iter()
            .find(|remapper| remapper.accepts(current, atp))
            .map(|remapper| remapper.album_group)
            .unwrap_or(current)
    }

    /// Files every release under its final group. Releases without a declared
    /// base group can't be placed and are dropped with a warning.
    pub fn remap(
        &self,
        album_track_pairs: Vec<AlbumTrackPair>,
    ) -> BTreeMap<AlbumGroupExtended, Vec<AlbumTrackPair>> {
        let mut grouped: BTreeMap<AlbumGroupExtended, Vec<AlbumTrackPair>> = BTreeMap::new();
        for atp in album_track_pairs {
            let Some(base) = atp.album.album_group() else {
                tracing::warn!(album = %atp.album.name, "Release has no album group, skipping");
                continue;
            };
            let group = self.classify(base.default_extended(), &atp);
            if group != base.default_extended() {
                tracing::debug!(
                    album = %atp.album.name,
                    from = %base,
                    to = %group,
                    "Remapped release"
                );
            }
            grouped.entry(group).or_default().push(atp);
        }
        grouped
    }
}

/// EPs are singles with four to six tracks, or longer singles running at least
/// twenty minutes.
pub fn qualifies_as_ep(atp: &AlbumTrackPair) -> bool {
    let track_count = atp.tracks.len();
    if (EP_MIN_TRACKS..=EP_MAX_TRACKS).contains(&track_count) {
        return true;
    }
    track_count > 1 && atp.total_duration_ms() >= EP_MIN_DURATION_MS
}

pub fn qualifies_as_live(atp: &AlbumTrackPair) -> bool {
    contains_marker_word(&atp.album.name, &LIVE_MARKERS)
        || majority_of_tracks(atp, |name| contains_marker_word(name, &LIVE_MARKERS))
}

pub fn qualifies_as_remix(atp: &AlbumTrackPair) -> bool {
    let name = atp.album.name.to_lowercase();
    name.contains("remix")
        || majority_of_tracks(atp, |track| {
            let track = track.to_lowercase();
            REMIX_MARKERS.iter().any(|marker| track.contains(marker))
        })
}

fn majority_of_tracks(atp: &AlbumTrackPair, matches: impl Fn(&str) -> bool) -> bool {
    if atp.tracks.is_empty() {
        return false;
    }
    let hits = atp
        .tracks
        .iter()
        .filter(|track| matches(&track.name))
        .count();
    hits * 2 > atp.tracks.len()
}

/// Whole-word match, so "Oliver" or "Delivery" don't count as live.
fn contains_marker_word(text: &str, markers: &[&str]) -> bool {
    let words: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect();

    markers.iter().any(|marker| {
        let marker_words: Vec<&str> = marker.split(' ').collect();
        words
            .windows(marker_words.len())
            .any(|window| window.iter().zip(&marker_words).all(|(a, b)| a == b))
    })
}
