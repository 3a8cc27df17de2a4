//! Environment overrides for deployment options.
//!
//! Keys follow the `PREFIX__SECTION__KEY` convention: the prefix is
//! stripped, double underscores become dots, and the remainder is
//! lowercased. `TENANTRY__CORS__ENABLED=false` therefore overrides
//! `cors.enabled`, and `TENANTRY__ROW_LIMIT=100` overrides `row_limit`.
//!
//! Durations accept humantime strings (`300s`, `5m`, `1day`). An
//! unparseable value keeps the previous setting and logs a warning.

use std::str::FromStr;
use std::time::Duration;

use crate::options::DeployOptions;

impl DeployOptions {
    /// Layer environment variables starting with `prefix` over these
    /// options.
    ///
    /// ```
    /// use tenantry_deploy::DeployOptions;
    ///
    /// std::env::set_var("TENANTRY__WEBSERVER_PORT", "9001");
    /// let mut options = DeployOptions::default();
    /// options.apply_env("TENANTRY__");
    /// assert_eq!(options.webserver_port, 9001);
    /// ```
    pub fn apply_env(&mut self, prefix: &str) {
        for (key, value) in std::env::vars() {
            if let Some(stripped) = key.strip_prefix(prefix) {
                let normalized = stripped.to_lowercase().replace("__", ".");
                self.apply_override(&normalized, &value);
            }
        }
    }

    fn apply_override(&mut self, key: &str, raw: &str) {
        match key {
            "row_limit" => set_parsed(&mut self.row_limit, key, raw),
            "webserver_port" => set_parsed(&mut self.webserver_port, key, raw),
            "webserver_timeout" => set_duration(&mut self.webserver_timeout, key, raw),
            "jwt_access_token_expires" => {
                set_duration(&mut self.jwt_access_token_expires, key, raw)
            }
            "secret_key" => self.secret_key = raw.to_string(),
            "database_url" => self.database_url = raw.to_string(),
            "talisman_enabled" => set_parsed(&mut self.talisman_enabled, key, raw),
            "enable_proxy_fix" => set_parsed(&mut self.enable_proxy_fix, key, raw),
            "tenant_claim" => self.tenant_claim = raw.to_string(),
            "cors.enabled" => set_parsed(&mut self.cors.enabled, key, raw),
            "cors.supports_credentials" => {
                set_parsed(&mut self.cors.supports_credentials, key, raw)
            }
            "cors.allow_headers" => self.cors.allow_headers = split_list(raw),
            "cors.resources" => self.cors.resources = split_list(raw),
            "cors.origins" => self.cors.origins = split_list(raw),
            "features.template_processing" => {
                set_parsed(&mut self.features.template_processing, key, raw)
            }
            "features.embedded" => set_parsed(&mut self.features.embedded, key, raw),
            other if other.starts_with("features.") => {
                let flag = &other["features.".len()..];
                match raw.parse::<bool>() {
                    Ok(v) => {
                        self.features.extra.insert(flag.to_string(), v);
                    }
                    Err(_) => warn_invalid(key, raw),
                }
            }
            _ => {
                tracing::debug!(target: "tenantry", "ignoring unknown override '{key}'");
            }
        }
    }
}

fn set_parsed<T: FromStr>(slot: &mut T, key: &str, raw: &str) {
    match raw.parse() {
        Ok(value) => *slot = value,
        Err(_) => warn_invalid(key, raw),
    }
}

fn set_duration(slot: &mut Duration, key: &str, raw: &str) {
    match humantime::parse_duration(raw) {
        Ok(value) => *slot = value,
        Err(_) => warn_invalid(key, raw),
    }
}

fn warn_invalid(key: &str, raw: &str) {
    tracing::warn!(target: "tenantry", "invalid value '{raw}' for '{key}', keeping previous");
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::options::DeployOptions;

    #[test]
    fn scalar_overrides_replace_defaults() {
        let mut options = DeployOptions::default();

        options.apply_override("row_limit", "250");
        options.apply_override("talisman_enabled", "true");
        options.apply_override("secret_key", "from-the-environment");

        assert_eq!(options.row_limit, 250);
        assert!(options.talisman_enabled);
        assert_eq!(options.secret_key, "from-the-environment");
    }

    #[test]
    fn durations_accept_humantime_strings() {
        let mut options = DeployOptions::default();

        options.apply_override("webserver_timeout", "5m");
        options.apply_override("jwt_access_token_expires", "12h");

        assert_eq!(options.webserver_timeout, Duration::from_secs(300));
        assert_eq!(options.jwt_access_token_expires, Duration::from_secs(43_200));
    }

    #[test]
    fn invalid_values_keep_the_previous_setting() {
        let mut options = DeployOptions::default();

        options.apply_override("row_limit", "lots");
        options.apply_override("webserver_timeout", "soon");

        assert_eq!(options.row_limit, 5000);
        assert_eq!(options.webserver_timeout, Duration::from_secs(300));
    }

    #[test]
    fn list_values_split_on_commas() {
        let mut options = DeployOptions::default();

        options.apply_override(
            "cors.origins",
            "https://bi.example.com, https://staging.example.com",
        );

        assert_eq!(
            options.cors.origins,
            vec!["https://bi.example.com", "https://staging.example.com"]
        );
    }

    #[test]
    fn ad_hoc_feature_flags_land_in_extra() {
        let mut options = DeployOptions::default();

        options.apply_override("features.embedded", "false");
        options.apply_override("features.dashboard_cache", "true");

        assert!(!options.features.embedded);
        assert!(options.features.is_enabled("dashboard_cache"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut options = DeployOptions::default();
        let before = options.clone();

        options.apply_override("no_such_option", "1");

        assert_eq!(options, before);
    }

    #[test]
    fn apply_env_strips_the_prefix_and_normalizes_keys() {
        std::env::set_var("TDEPLOY_ENV_TEST__CORS__ENABLED", "false");
        std::env::set_var("TDEPLOY_ENV_TEST__ROW_LIMIT", "42");

        let mut options = DeployOptions::default();
        options.apply_env("TDEPLOY_ENV_TEST__");

        assert!(!options.cors.enabled);
        assert_eq!(options.row_limit, 42);
    }
}
