//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Secrets are never stored here: every credential field names an
//! environment variable to read at startup instead.

use quadbot_application::ExecutionParams;
use quadbot_domain::DEFAULT_MAX_STEPS;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Language model settings
    pub llm: FileLlmConfig,
    /// Campus endpoint settings
    pub campus: FileCampusConfig,
    /// Controlled vocabulary file locations
    pub vocab: FileVocabConfig,
    /// Agent loop settings
    pub agent: FileAgentConfig,
}

/// `[llm]` section: OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    pub model: String,
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

/// `[campus]` section: the institution's public REST endpoints plus the
/// identity used to steer web search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCampusConfig {
    /// Calendar feed endpoint base; the feed type is appended as the file
    /// extension (`{calendar_url}.{feed_type}`)
    pub calendar_url: String,
    /// Curriculum endpoint base (`{curriculum_url}/subject/{code}` and
    /// `{curriculum_url}/crse_id/{id}/crse_offer_nbr/{n}`)
    pub curriculum_url: String,
    /// People directory search endpoint
    pub directory_url: String,
    /// Institution name prepended to web searches when missing
    pub institution: String,
    /// Primary institutional domain prioritized in search results
    pub priority_domain: String,
    /// School subdomain given an extra priority tier (may be empty)
    pub school_subdomain: String,
    /// Environment variable holding the curriculum/directory access token
    pub api_token_env: String,
    /// Environment variable holding the SerpAPI key
    pub serpapi_key_env: String,
    pub timeout_secs: u64,
}

impl Default for FileCampusConfig {
    fn default() -> Self {
        Self {
            calendar_url: "https://calendar.example.edu/events/index".to_string(),
            curriculum_url: "https://api.example.edu/curriculum/courses".to_string(),
            directory_url: "https://api.example.edu/ldap/people".to_string(),
            institution: "Example University".to_string(),
            priority_domain: "example.edu".to_string(),
            school_subdomain: String::new(),
            api_token_env: "CAMPUS_API_TOKEN".to_string(),
            serpapi_key_env: "SERPAPI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

/// `[vocab]` section: one UTF-8 text file per controlled list, one canonical
/// value per line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVocabConfig {
    pub subjects_path: String,
    pub groups_path: String,
    pub categories_path: String,
}

impl Default for FileVocabConfig {
    fn default() -> Self {
        Self {
            subjects_path: "vocab/subjects.txt".to_string(),
            groups_path: "vocab/groups.txt".to_string(),
            categories_path: "vocab/categories.txt".to_string(),
        }
    }
}

/// `[agent]` section: loop and normalization bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub max_steps: usize,
    pub fuzzy_top_n: usize,
    pub resolver_match_limit: usize,
    pub curriculum_record_limit: usize,
    pub default_future_days: u32,
    pub event_feed_max_bytes: usize,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            fuzzy_top_n: params.fuzzy_top_n,
            resolver_match_limit: params.resolver_match_limit,
            curriculum_record_limit: params.curriculum_record_limit,
            default_future_days: params.default_future_days,
            event_feed_max_bytes: params.event_feed_max_bytes,
        }
    }
}

impl FileAgentConfig {
    /// Convert to the application-layer execution parameters.
    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams {
            max_steps: self.max_steps,
            fuzzy_top_n: self.fuzzy_top_n,
            resolver_match_limit: self.resolver_match_limit,
            curriculum_record_limit: self.curriculum_record_limit,
            default_future_days: self.default_future_days,
            event_feed_max_bytes: self.event_feed_max_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_secrets() {
        let config = FileConfig::default();
        // Only env-var NAMES appear in config
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.campus.api_token_env, "CAMPUS_API_TOKEN");
        assert_eq!(config.campus.serpapi_key_env, "SERPAPI_API_KEY");
    }

    #[test]
    fn test_agent_section_round_trips_to_params() {
        let config = FileAgentConfig::default();
        let params = config.execution_params();
        assert_eq!(params.max_steps, DEFAULT_MAX_STEPS);
        assert_eq!(params.curriculum_record_limit, 5);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [agent]
            max_steps = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.agent.max_steps, 8);
        assert_eq!(config.agent.curriculum_record_limit, 5);
        assert_eq!(config.llm.model, "gpt-4o-mini");
    }
}
