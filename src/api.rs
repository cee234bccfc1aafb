use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::DashboardConfig;
use crate::error::DashboardError;

// -- Arg structs for serialization --

#[derive(Serialize)]
struct ProfileArgs<'a> {
    school_name: &'a str,
    delta: f64,
}

#[derive(Serialize)]
struct RankArgs<'a> {
    state: &'a str,
    feature: &'a str,
}

// -- Simulator types matching backend payloads --

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Metadata {
    pub schools: Vec<String>,
}

/// Happiness gain for raising one feature by the requested delta.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FeatureGain {
    pub feature: String,
    pub gain_percent: f64,
    pub current_percent: f64,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub new_value: Option<f64>,
}

/// One step of the delta sweep, with the feature that wins at that delta.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SweepPoint {
    pub delta: f64,
    pub gain_percent: f64,
    pub best_feature: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MarginalRow {
    pub feature: String,
    pub optimal_delta: f64,
    pub jump_size: f64,
}

/// Full what-if profile for one school at one delta.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Profile {
    #[serde(rename = "baseline_happiness")]
    pub baseline_score: f64,
    #[serde(default)]
    pub rankings: Vec<FeatureGain>,
    #[serde(default)]
    pub sweep: Vec<SweepPoint>,
    #[serde(default)]
    pub marginal: Vec<MarginalRow>,
}

// -- Ranking view types --

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StateScore {
    pub state: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchoolScore {
    pub school_name: String,
    pub score: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Distribution {
    pub labels: Vec<String>,
    pub counts: Vec<u32>,
}

/// The rank endpoint answers `[]` instead of an object when the feature is unknown.
#[derive(Deserialize)]
#[serde(untagged)]
enum DistributionWire {
    Bins(Distribution),
    Empty(Vec<Value>),
}

impl Default for DistributionWire {
    fn default() -> Self {
        DistributionWire::Empty(vec![])
    }
}

#[derive(Deserialize)]
struct RankingWire {
    #[serde(default)]
    average_score: f64,
    #[serde(default)]
    top_schools: Vec<Map<String, Value>>,
    #[serde(default)]
    top_states: Vec<StateScore>,
    #[serde(default)]
    distribution: DistributionWire,
    #[serde(default)]
    school_count: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    pub average_score: f64,
    pub top_schools: Vec<SchoolScore>,
    pub top_states: Vec<StateScore>,
    pub distribution: Distribution,
    pub school_count: Option<usize>,
}

impl RankingWire {
    /// Top-school rows carry their score under a key named after the feature.
    fn into_ranking(self, feature: &str) -> Result<Ranking, DashboardError> {
        let mut top_schools = Vec::with_capacity(self.top_schools.len());
        for row in &self.top_schools {
            let school_name = row
                .get("school_name")
                .and_then(Value::as_str)
                .ok_or_else(|| DashboardError::Malformed("top school without school_name".into()))?
                .to_string();
            let score = row.get(feature).and_then(Value::as_f64).ok_or_else(|| {
                DashboardError::Malformed(format!("top school '{}' has no '{}' score", school_name, feature))
            })?;
            top_schools.push(SchoolScore { school_name, score });
        }

        let distribution = match self.distribution {
            DistributionWire::Bins(d) => {
                if d.labels.len() != d.counts.len() {
                    return Err(DashboardError::Malformed(format!(
                        "distribution has {} labels but {} counts",
                        d.labels.len(),
                        d.counts.len()
                    )));
                }
                d
            }
            DistributionWire::Empty(_) => Distribution::default(),
        };

        Ok(Ranking {
            average_score: self.average_score,
            top_schools,
            top_states: self.top_states,
            distribution,
            school_count: self.school_count,
        })
    }
}

/// Parse a rank response body for the given feature.
pub fn parse_ranking(body: &str, feature: &str) -> Result<Ranking, DashboardError> {
    let wire: RankingWire =
        serde_json::from_str(body).map_err(|e| DashboardError::Malformed(e.to_string()))?;
    wire.into_ranking(feature)
}

// -- Typed request helpers --

/// Pass a 2xx response through; anything else becomes `DashboardError::Server`.
async fn check_status(response: Response) -> Result<Response, DashboardError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(DashboardError::Server {
        status,
        message: server_message(&body),
    })
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, DashboardError> {
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| DashboardError::Malformed(e.to_string()))
}

/// Error bodies look like `{"error": "School not found"}`; fall back to the raw text.
fn server_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

pub async fn fetch_metadata(config: &DashboardConfig) -> Result<Metadata, DashboardError> {
    let response = Request::get(&config.endpoint("/api/metadata")).send().await?;
    handle_response(response).await
}

pub async fn list_states(config: &DashboardConfig) -> Result<Vec<String>, DashboardError> {
    let response = Request::get(&config.endpoint("/api/states")).send().await?;
    handle_response(response).await
}

/// `delta` is a decimal fraction, not percent.
pub async fn fetch_profile(
    config: &DashboardConfig,
    school_name: &str,
    delta: f64,
) -> Result<Profile, DashboardError> {
    let response = Request::post(&config.endpoint("/api/school_profile_full"))
        .json(&ProfileArgs { school_name, delta })?
        .send()
        .await?;
    handle_response(response).await
}

pub async fn fetch_ranking(
    config: &DashboardConfig,
    state: &str,
    feature: &str,
) -> Result<Ranking, DashboardError> {
    let response = Request::post(&config.endpoint("/api/analytics/rank"))
        .json(&RankArgs { state, feature })?
        .send()
        .await?;
    let body = check_status(response).await?.text().await?;
    parse_ranking(&body, feature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_payload_parses() {
        let json = r#"{
            "baseline_happiness": 62.5,
            "rankings": [
                {"feature": "facilities", "current_value": 3.1, "current_percent": 41.6,
                 "new_value": 3.5, "gain": 0.032, "gain_percent": 3.2},
                {"feature": "safety", "current_percent": 70.0, "gain_percent": -1.1}
            ],
            "sweep": [{"delta": 5, "best_feature": "food", "gain_percent": 0.8}],
            "marginal": [{"feature": "clubs", "optimal_delta": 12, "jump_size": 0.412}]
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.baseline_score, 62.5);
        assert_eq!(profile.rankings.len(), 2);
        assert_eq!(profile.rankings[0].current_value, Some(3.1));
        assert_eq!(profile.rankings[1].new_value, None);
        assert_eq!(profile.sweep[0].delta, 5.0);
        assert_eq!(profile.marginal[0].optimal_delta, 12.0);
    }

    #[test]
    fn test_profile_missing_lists_default_to_empty() {
        let profile: Profile = serde_json::from_str(r#"{"baseline_happiness": 50}"#).unwrap();
        assert!(profile.rankings.is_empty());
        assert!(profile.sweep.is_empty());
        assert!(profile.marginal.is_empty());
    }

    #[test]
    fn test_ranking_reads_score_under_feature_key() {
        let body = r#"{
            "top_schools": [{"school_name": "Alpha College", "safety": 4.21}],
            "top_states": [{"state": "FL", "score": 3.9}],
            "distribution": {"labels": ["1.0-1.5", "1.5-2.0"], "counts": [0, 3]},
            "school_count": 3,
            "average_score": 3.72
        }"#;
        let ranking = parse_ranking(body, "safety").unwrap();
        assert_eq!(ranking.top_schools[0].school_name, "Alpha College");
        assert_eq!(ranking.top_schools[0].score, 4.21);
        assert_eq!(ranking.top_states[0].state, "FL");
        assert_eq!(ranking.distribution.counts, vec![0, 3]);
        assert_eq!(ranking.school_count, Some(3));
    }

    #[test]
    fn test_ranking_accepts_empty_list_distribution() {
        let body = r#"{"top_schools": [], "top_states": [], "distribution": [], "average_score": 0}"#;
        let ranking = parse_ranking(body, "nonexistent").unwrap();
        assert!(ranking.top_schools.is_empty());
        assert_eq!(ranking.distribution, Distribution::default());
    }

    #[test]
    fn test_ranking_missing_feature_score_is_malformed() {
        let body = r#"{"top_schools": [{"school_name": "Alpha College", "food": 4.0}]}"#;
        let err = parse_ranking(body, "safety").unwrap_err();
        assert!(matches!(err, DashboardError::Malformed(_)), "got {:?}", err);
    }

    #[test]
    fn test_ranking_mismatched_distribution_is_malformed() {
        let body = r#"{"distribution": {"labels": ["a", "b"], "counts": [1]}}"#;
        assert!(parse_ranking(body, "safety").is_err());
    }

    #[test]
    fn test_metadata_reads_schools_and_ignores_extras() {
        let json = r#"{"schools": ["Beta University", "Alpha College"], "controllable": ["safety"]}"#;
        let meta: Metadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.schools, vec!["Beta University", "Alpha College"]);
    }

    #[test]
    fn test_server_message_prefers_error_field() {
        assert_eq!(server_message(r#"{"error": "School not found"}"#), "School not found");
        assert_eq!(server_message("Bad Gateway"), "Bad Gateway");
    }
}
