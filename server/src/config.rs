//! Server configuration from environment variables

use std::path::PathBuf;

use pagewright::compose::RenderSettings;
use pagewright::error::{Error, PwResult};

pub struct Config {
	pub listen: Box<str>,
	pub db_dir: PathBuf,
	pub render: RenderSettings,
}

impl Config {
	pub fn from_env() -> PwResult<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Build the config from any key lookup (the process environment in production)
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PwResult<Self> {
		let mut render = RenderSettings::default();
		if let Some(ms) = lookup("PAGEWRIGHT_RESOLVE_TIMEOUT_MS") {
			render.resolve_timeout_ms = parse_var("PAGEWRIGHT_RESOLVE_TIMEOUT_MS", &ms)?;
		}
		if let Some(ms) = lookup("PAGEWRIGHT_WIDGET_TIMEOUT_MS") {
			render.widget_timeout_ms = parse_var("PAGEWRIGHT_WIDGET_TIMEOUT_MS", &ms)?;
		}
		if let Some(flag) = lookup("PAGEWRIGHT_PARALLEL_WIDGETS") {
			render.parallel_widgets = parse_var("PAGEWRIGHT_PARALLEL_WIDGETS", &flag)?;
		}

		Ok(Config {
			listen: lookup("LISTEN").unwrap_or_else(|| "127.0.0.1:8080".into()).into(),
			db_dir: PathBuf::from(lookup("DB_DIR").unwrap_or_else(|| "./data".into())),
			render,
		})
	}
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> PwResult<T> {
	value
		.trim()
		.parse()
		.map_err(|_| Error::ConfigError(format!("invalid value for {}: {:?}", key, value)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> =
			vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
		move |key| vars.get(key).cloned()
	}

	#[test]
	fn test_defaults() {
		let config = Config::from_lookup(lookup(&[])).unwrap();
		assert_eq!(&*config.listen, "127.0.0.1:8080");
		assert_eq!(config.db_dir, PathBuf::from("./data"));
		assert_eq!(config.render, RenderSettings::default());
	}

	#[test]
	fn test_overrides() {
		let config = Config::from_lookup(lookup(&[
			("LISTEN", "0.0.0.0:9000"),
			("DB_DIR", "/var/lib/pagewright"),
			("PAGEWRIGHT_RESOLVE_TIMEOUT_MS", "500"),
			("PAGEWRIGHT_WIDGET_TIMEOUT_MS", "0"),
			("PAGEWRIGHT_PARALLEL_WIDGETS", "false"),
		]))
		.unwrap();
		assert_eq!(&*config.listen, "0.0.0.0:9000");
		assert_eq!(config.render.resolve_timeout_ms, 500);
		assert_eq!(config.render.widget_timeout_ms, 0);
		assert!(!config.render.parallel_widgets);
		assert_eq!(config.render.dispatch_options().widget_timeout, None);
	}

	#[test]
	fn test_zero_resolve_timeout_is_unbounded() {
		let config = Config::from_lookup(lookup(&[("PAGEWRIGHT_RESOLVE_TIMEOUT_MS", "0")])).unwrap();
		assert_eq!(config.render.resolve_timeout(), None);
	}

	#[test]
	fn test_invalid_value() {
		let res = Config::from_lookup(lookup(&[("PAGEWRIGHT_WIDGET_TIMEOUT_MS", "soon")]));
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}
}

// vim: ts=4
