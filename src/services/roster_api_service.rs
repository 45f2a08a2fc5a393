use reqwest::Url;
use serde::Deserialize;
use tracing::warn;

use crate::board::{ActivitySource, MutationResponse, SourceError};
use crate::models::Catalog;
use crate::settings::Settings;

#[derive(Debug, Default, Deserialize)]
struct CommandBody {
    message: Option<String>,
    detail: Option<String>,
}

/// Board data source talking to the activities API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpActivitySource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpActivitySource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SourceError::Transport(format!("invalid base url {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SourceError::Transport(format!(
                "base url {} cannot carry a path",
                base_url
            )));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    /// `None` when no API url is configured.
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>, SourceError> {
        settings.api_url.as_deref().map(Self::new).transpose()
    }

    /// `{base}/activities[/{segments}]`, each segment percent-encoded.
    fn activities_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("activities").extend(segments);
        }
        url
    }

    async fn post_command(
        &self,
        activity: &str,
        email: &str,
        command: &str,
    ) -> Result<MutationResponse, SourceError> {
        let url = self.activities_url(&[activity, command]);
        let resp = self
            .client
            .post(url.clone())
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "activities api unreachable");
                SourceError::Transport(e.to_string())
            })?;

        let status = resp.status();
        if status.is_success() {
            let body: CommandBody = resp
                .json()
                .await
                .map_err(|e| SourceError::Decode(e.to_string()))?;
            return Ok(MutationResponse::Accepted {
                message: body.message.unwrap_or_default(),
            });
        }

        // A rejection without a readable body still counts as a rejection.
        let body = resp.json::<CommandBody>().await.unwrap_or_default();
        Ok(MutationResponse::Rejected {
            status: status.as_u16(),
            detail: body.detail,
        })
    }
}

impl ActivitySource for HttpActivitySource {
    async fn fetch_catalog(&self) -> Result<Catalog, SourceError> {
        let url = self.activities_url(&[]);
        let resp = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "activities api unreachable");
            SourceError::Transport(e.to_string())
        })?;

        if !resp.status().is_success() {
            return Err(SourceError::Transport(format!(
                "unexpected status {} from {}",
                resp.status(),
                url
            )));
        }

        resp.json::<Catalog>()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<MutationResponse, SourceError> {
        self.post_command(activity, email, "signup").await
    }

    async fn unregister(
        &self,
        activity: &str,
        email: &str,
    ) -> Result<MutationResponse, SourceError> {
        self.post_command(activity, email, "unregister").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_urls_encode_the_activity_segment() {
        let source = HttpActivitySource::new("http://127.0.0.1:3000/").unwrap();
        let url = source.activities_url(&["Chess Club/Advanced", "signup"]);
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:3000/activities/Chess%20Club%2FAdvanced/signup"
        );
    }

    #[test]
    fn base_path_is_kept() {
        let source = HttpActivitySource::new("http://roster.localhost/api").unwrap();
        assert_eq!(
            source.activities_url(&[]).as_str(),
            "http://roster.localhost/api/activities"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(HttpActivitySource::new("not a url").is_err());
        assert!(HttpActivitySource::new("mailto:office@mergington.edu").is_err());
    }

    #[test]
    fn settings_without_api_url_yield_no_source() {
        assert!(HttpActivitySource::from_settings(&Settings::default())
            .unwrap()
            .is_none());

        let settings = Settings {
            api_url: Some("not a url".to_string()),
            ..Settings::default()
        };
        assert!(HttpActivitySource::from_settings(&settings).is_err());
    }
}
