use std::{
	cmp::Reverse,
	collections::{HashMap, HashSet},
};

use serde::{Deserialize, Serialize};

/// An entity id with its relevance score for one query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
	pub id: i64,
	pub score: f32,
}

/// Offset/limit over a ranked list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
	pub limit: u32,
	pub offset: u32,
}
impl Window {
	pub fn new(limit: u32, offset: u32) -> Self {
		Self { limit, offset }
	}

	pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
		let start = (self.offset as usize).min(items.len());
		let end = start.saturating_add(self.limit as usize).min(items.len());

		&items[start..end]
	}

	pub fn sql_limit(&self) -> i64 {
		i64::from(self.limit)
	}

	pub fn sql_offset(&self) -> i64 {
		i64::from(self.offset)
	}
}

pub fn candidate_ids(candidates: &[RankedCandidate]) -> Vec<i64> {
	candidates.iter().map(|candidate| candidate.id).collect()
}

/// Reorders fetched `rows` to follow `ids`.
///
/// Ids with no matching row are dropped, and repeated ids keep only their first position.
pub fn restore_order<T, F>(ids: &[i64], rows: Vec<T>, key: F) -> Vec<T>
where
	F: Fn(&T) -> i64,
{
	let mut by_id: HashMap<i64, T> = rows.into_iter().map(|row| (key(&row), row)).collect();

	ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

/// Keeps the candidates present in `related`, in candidate order.
pub fn retain_related(candidates: &[i64], related: &HashSet<i64>) -> Vec<i64> {
	candidates.iter().copied().filter(|id| related.contains(id)).collect()
}

/// Stable sort, highest count first.
pub fn rank_by_count<T, F>(items: &mut [T], count: F)
where
	F: Fn(&T) -> i64,
{
	items.sort_by_key(|item| Reverse(count(item)));
}
