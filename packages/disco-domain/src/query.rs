use crate::{Error, Result};

/// Prepares a full or autocomplete search query for trigram matching.
///
/// The lexeme dictionaries are built with `&` spelled out as `and`, so the query is rewritten
/// the same way before it is compared against them.
pub fn normalize_search_query(raw: Option<&str>) -> Result<String> {
	let trimmed = raw.map(str::trim).unwrap_or_default();

	if trimmed.is_empty() {
		return Err(Error::EmptyQuery);
	}

	Ok(trimmed.replace('&', "and"))
}

pub fn normalize_tag_query(raw: Option<&str>) -> Result<String> {
	let trimmed = raw.map(str::trim).unwrap_or_default();

	if trimmed.is_empty() {
		return Err(Error::EmptyQuery);
	}

	Ok(trimmed.to_string())
}

/// Builds an `ILIKE` pattern that matches `tag` anywhere in a tag string.
pub fn contains_pattern(tag: &str) -> String {
	let mut out = String::with_capacity(tag.len() + 2);

	out.push('%');

	for ch in tag.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			out.push('\\');
		}

		out.push(ch);
	}

	out.push('%');

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ampersand_is_spelled_out() {
		assert_eq!(normalize_search_query(Some(" drum & bass ")).unwrap(), "drum and bass");
	}

	#[test]
	fn like_metacharacters_are_escaped() {
		assert_eq!(contains_pattern("100%_lo\\fi"), "%100\\%\\_lo\\\\fi%");
	}
}
