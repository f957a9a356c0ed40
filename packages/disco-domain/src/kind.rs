use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A searchable catalog entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
	Track,
	User,
	Playlist,
	Album,
}
impl EntityKind {
	/// The relation a user must hold to an entity for it to appear in the personalized group.
	pub fn relation(self) -> RelationKind {
		match self {
			Self::Track => RelationKind::Save(ItemType::Track),
			Self::User => RelationKind::Follow,
			Self::Playlist => RelationKind::Save(ItemType::Playlist),
			Self::Album => RelationKind::Save(ItemType::Album),
		}
	}

	pub fn personalized_field(self) -> &'static str {
		match self {
			Self::Track => "saved_tracks",
			Self::User => "followed_users",
			Self::Playlist => "saved_playlists",
			Self::Album => "saved_albums",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
	Track,
	Playlist,
	Album,
}
impl ItemType {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Track => "track",
			Self::Playlist => "playlist",
			Self::Album => "album",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
	Save(ItemType),
	Follow,
}

/// `kind` parameter of full and autocomplete search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
	#[default]
	All,
	Tracks,
	Users,
	Playlists,
	Albums,
}
impl SearchKind {
	pub const NAMES: [&'static str; 5] = ["all", "tracks", "users", "playlists", "albums"];

	pub fn entity_kinds(self) -> &'static [EntityKind] {
		match self {
			Self::All =>
				&[EntityKind::Track, EntityKind::User, EntityKind::Playlist, EntityKind::Album],
			Self::Tracks => &[EntityKind::Track],
			Self::Users => &[EntityKind::User],
			Self::Playlists => &[EntityKind::Playlist],
			Self::Albums => &[EntityKind::Album],
		}
	}
}
impl FromStr for SearchKind {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self> {
		match raw {
			"all" => Ok(Self::All),
			"tracks" => Ok(Self::Tracks),
			"users" => Ok(Self::Users),
			"playlists" => Ok(Self::Playlists),
			"albums" => Ok(Self::Albums),
			_ => Err(Error::InvalidChoice { parameter: "kind", allowed: Self::NAMES.to_vec() }),
		}
	}
}

/// `kind` parameter of tag search. Playlists and albums carry no tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagSearchKind {
	#[default]
	All,
	Tracks,
	Users,
}
impl TagSearchKind {
	pub const NAMES: [&'static str; 3] = ["all", "tracks", "users"];

	pub fn includes_tracks(self) -> bool {
		matches!(self, Self::All | Self::Tracks)
	}

	pub fn includes_users(self) -> bool {
		matches!(self, Self::All | Self::Users)
	}
}
impl FromStr for TagSearchKind {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self> {
		match raw {
			"all" => Ok(Self::All),
			"tracks" => Ok(Self::Tracks),
			"users" => Ok(Self::Users),
			_ => Err(Error::InvalidChoice { parameter: "kind", allowed: Self::NAMES.to_vec() }),
		}
	}
}
