pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl Error {
	/// True when the caller sent a bad request rather than the backend failing.
	pub fn is_client_error(&self) -> bool {
		matches!(self, Self::InvalidRequest { .. })
	}
}
impl From<disco_domain::Error> for Error {
	fn from(err: disco_domain::Error) -> Self {
		Self::InvalidRequest { message: err.to_string() }
	}
}
impl From<disco_storage::Error> for Error {
	fn from(err: disco_storage::Error) -> Self {
		match err {
			disco_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			disco_storage::Error::Redis(inner) => Self::Storage { message: inner.to_string() },
			disco_storage::Error::SerdeJson(inner) => Self::Storage { message: inner.to_string() },
			disco_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}
