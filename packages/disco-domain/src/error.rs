pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Invalid value for parameter 'query'.")]
	EmptyQuery,
	#[error("Invalid value for parameter '{parameter}' must be in {allowed:?}.")]
	InvalidChoice { parameter: &'static str, allowed: Vec<&'static str> },
}
