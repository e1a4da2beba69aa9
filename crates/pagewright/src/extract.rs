//! Custom extractors for Pagewright-specific data

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::prelude::*;

// RequestHost //
//*************//
/// Host the request was addressed to, lower-cased and without port.
///
/// Always succeeds; `None` if the request carries no usable `Host` header.
#[derive(Clone, Debug)]
pub struct RequestHost(pub Option<Box<str>>);

impl<S> FromRequestParts<S> for RequestHost
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let host = parts
			.headers
			.get(header::HOST)
			.and_then(|value| value.to_str().ok())
			.or_else(|| parts.uri.host())
			.map(strip_port)
			.filter(|host| !host.is_empty())
			.map(|host| host.to_ascii_lowercase().into());
		Ok(RequestHost(host))
	}
}

fn strip_port(host: &str) -> &str {
	let host = host.trim();
	if host.starts_with('[') {
		// IPv6 literal
		return host.split_once(']').map_or(host, |(addr, _)| addr.trim_start_matches('['));
	}
	host.rsplit_once(':').map_or(host, |(name, _)| name)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_strip_port() {
		assert_eq!(strip_port("example.com:8080"), "example.com");
		assert_eq!(strip_port("example.com"), "example.com");
		assert_eq!(strip_port("[::1]:8080"), "::1");
	}
}

// vim: ts=4
