//! The classification domain: base album groups as the catalog reports them and
//! the finer extended groups the bot files releases under.
//!
//! Declaration order of both enums is the fixed total order used everywhere a
//! list of groups is presented (enabled groups, result summaries, diff output).

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlbumGroup {
    Album,
    Single,
    Compilation,
    AppearsOn,
}

impl AlbumGroup {
    pub const ALL: [AlbumGroup; 4] = [
        AlbumGroup::Album,
        AlbumGroup::Single,
        AlbumGroup::Compilation,
        AlbumGroup::AppearsOn,
    ];

    /// The value the catalog uses for this group (`include_groups`, `album_group`).
    pub fn as_str(&self) -> &'static str {
        match self {
            AlbumGroup::Album => "album",
            AlbumGroup::Single => "single",
            AlbumGroup::Compilation => "compilation",
            AlbumGroup::AppearsOn => "appears_on",
        }
    }

    /// The extended group a release of this group is filed under unless a
    /// remapper claims it.
    pub fn default_extended(&self) -> AlbumGroupExtended {
        match self {
            AlbumGroup::Album => AlbumGroupExtended::Album,
            AlbumGroup::Single => AlbumGroupExtended::Single,
            AlbumGroup::Compilation => AlbumGroupExtended::Compilation,
            AlbumGroup::AppearsOn => AlbumGroupExtended::AppearsOn,
        }
    }
}

impl fmt::Display for AlbumGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlbumGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "album" => Ok(AlbumGroup::Album),
            "single" => Ok(AlbumGroup::Single),
            "compilation" => Ok(AlbumGroup::Compilation),
            "appears_on" => Ok(AlbumGroup::AppearsOn),
            other => Err(format!("invalid value '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlbumGroupExtended {
    Album,
    Single,
    Compilation,
    AppearsOn,
    Ep,
    Remix,
    Live,
}

impl AlbumGroupExtended {
    pub const ALL: [AlbumGroupExtended; 7] = [
        AlbumGroupExtended::Album,
        AlbumGroupExtended::Single,
        AlbumGroupExtended::Compilation,
        AlbumGroupExtended::AppearsOn,
        AlbumGroupExtended::Ep,
        AlbumGroupExtended::Remix,
        AlbumGroupExtended::Live,
    ];

    /// The base group this extended group refines. Total and fixed.
    pub fn parent(&self) -> AlbumGroup {
        match self {
            AlbumGroupExtended::Album | AlbumGroupExtended::Live => AlbumGroup::Album,
            AlbumGroupExtended::Single | AlbumGroupExtended::Ep | AlbumGroupExtended::Remix => {
                AlbumGroup::Single
            }
            AlbumGroupExtended::Compilation => AlbumGroup::Compilation,
            AlbumGroupExtended::AppearsOn => AlbumGroup::AppearsOn,
        }
    }

    /// The 1:1 image of a base group, if this is one.
    pub fn as_base(&self) -> Option<AlbumGroup> {
        AlbumGroup::ALL
            .into_iter()
            .find(|group| group.default_extended() == *self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlbumGroupExtended::Album => "album",
            AlbumGroupExtended::Single => "single",
            AlbumGroupExtended::Compilation => "compilation",
            AlbumGroupExtended::AppearsOn => "appears_on",
            AlbumGroupExtended::Ep => "ep",
            AlbumGroupExtended::Remix => "remix",
            AlbumGroupExtended::Live => "live",
        }
    }

    /// Label used in result summaries, e.g. `Appears On`.
    pub fn label(&self) -> &'static str {
        match self {
            AlbumGroupExtended::Album => "Album",
            AlbumGroupExtended::Single => "Single",
            AlbumGroupExtended::Compilation => "Compilation",
            AlbumGroupExtended::AppearsOn => "Appears On",
            AlbumGroupExtended::Ep => "EP",
            AlbumGroupExtended::Remix => "Remix",
            AlbumGroupExtended::Live => "Live",
        }
    }
}

impl From<AlbumGroup> for AlbumGroupExtended {
    fn from(group: AlbumGroup) -> Self {
        group.default_extended()
    }
}

impl fmt::Display for AlbumGroupExtended {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlbumGroupExtended {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        AlbumGroupExtended::ALL
            .into_iter()
            .find(|group| group.as_str() == normalized)
            .ok_or_else(|| format!("invalid value '{normalized}'"))
    }
}

/// An ordered, deduplicated set of base groups. Displays as the comma separated
/// `include_groups` value the catalog expects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlbumGroups(pub BTreeSet<AlbumGroup>);

impl AlbumGroups {
    pub fn contains(&self, group: AlbumGroup) -> bool {
        self.0.contains(&group)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<AlbumGroup> for AlbumGroups {
    fn from_iter<I: IntoIterator<Item = AlbumGroup>>(iter: I) -> Self {
        AlbumGroups(iter.into_iter().collect())
    }
}

impl fmt::Display for AlbumGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(AlbumGroup::as_str)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}
