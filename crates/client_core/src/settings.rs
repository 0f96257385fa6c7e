use url::Url;

/// Where the hero API lives. The base always ends with `/` so request paths
/// resolve underneath it instead of replacing its last segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base: Url,
}

impl ClientSettings {
    pub fn from_server_url(server_url: &str) -> Result<Self, url::ParseError> {
        let mut api_base = Url::parse(server_url.trim())?;
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }
        Ok(Self { api_base })
    }

    /// Resolves a route such as `/api/heroes/12` against the base.
    pub fn resolve(&self, path: &str) -> Result<Url, url::ParseError> {
        self.api_base.join(path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_base_prefix_when_resolving_routes() {
        let settings = ClientSettings::from_server_url("http://localhost:8080/tour").expect("url");
        assert_eq!(settings.api_base.as_str(), "http://localhost:8080/tour/");
        assert_eq!(
            settings.resolve("/api/heroes/").expect("join").as_str(),
            "http://localhost:8080/tour/api/heroes/"
        );
    }

    #[test]
    fn rejects_relative_server_url() {
        assert!(ClientSettings::from_server_url("localhost").is_err());
    }
}
