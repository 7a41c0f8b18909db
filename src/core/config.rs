use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "llama3";
const DEFAULT_MAX_INPUT_CHARS: usize = 2000;
const DEFAULT_CHUNK_SIZE: usize = 800;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
const DEFAULT_PIPELINE_TIMEOUT_SECS: u64 = 180;
const DEFAULT_DATABASE_URL: &str = "sqlite://summaries.db?mode=rwc";
const DEFAULT_HISTORY_LIMIT: u32 = 10;
const DEFAULT_SLACK_HISTORY_LIMIT: u32 = 100;
const DEFAULT_DISPLAY_TIMEZONE: &str = "Asia/Tokyo";

/// What the controller does when a chunk-level inference call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Abandon all partial output and run one heuristic pass over the whole clip.
    #[default]
    WholePipeline,
    /// Replace only the failing chunk with its heuristic summary.
    PerChunk,
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pipeline" | "whole" | "whole-pipeline" => Ok(FallbackPolicy::WholePipeline),
            "per-chunk" | "chunk" | "per_chunk" => Ok(FallbackPolicy::PerChunk),
            other => Err(format!(
                "unknown fallback policy '{other}' (expected 'pipeline' or 'per-chunk')"
            )),
        }
    }
}

/// Knobs for one summarization run, handed to the controller at construction.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub max_input_chars: usize,
    pub chunk_size: usize,
    pub chunk_timeout: Duration,
    pub reduction_timeout: Duration,
    pub pipeline_timeout: Duration,
    pub force_heuristic: bool,
    pub fallback_policy: FallbackPolicy,
    pub parallel_chunks: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            reduction_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            pipeline_timeout: Duration::from_secs(DEFAULT_PIPELINE_TIMEOUT_SECS),
            force_heuristic: false,
            fallback_policy: FallbackPolicy::WholePipeline,
            parallel_chunks: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SlackConfig {
    pub bot_token: String,
    pub signing_secret: String,
    pub history_limit: u32,
    pub display_timezone: Tz,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub ollama_url: String,
    pub ollama_model: String,
    pub database_url: String,
    pub history_limit: u32,
    pub pipeline: PipelineConfig,
    pub slack: Option<SlackConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_timeout_secs = parse_or(&get, "LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?;
        let reduction_timeout_secs = parse_or(&get, "REDUCTION_TIMEOUT_SECS", llm_timeout_secs)?;

        let pipeline = PipelineConfig {
            max_input_chars: positive(
                "MAX_INPUT_CHARS",
                parse_or(&get, "MAX_INPUT_CHARS", DEFAULT_MAX_INPUT_CHARS)?,
            )?,
            chunk_size: positive("CHUNK_SIZE", parse_or(&get, "CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?)?,
            chunk_timeout: Duration::from_secs(llm_timeout_secs),
            reduction_timeout: Duration::from_secs(reduction_timeout_secs),
            pipeline_timeout: Duration::from_secs(parse_or(
                &get,
                "PIPELINE_TIMEOUT_SECS",
                DEFAULT_PIPELINE_TIMEOUT_SECS,
            )?),
            force_heuristic: parse_bool(&get, "FORCE_HEURISTIC")?,
            fallback_policy: get("FALLBACK_POLICY")
                .map(|v| v.parse::<FallbackPolicy>())
                .transpose()
                .map_err(|e| format!("FALLBACK_POLICY: {e}"))?
                .unwrap_or_default(),
            parallel_chunks: parse_bool(&get, "PARALLEL_CHUNKS")?,
        };

        let slack = match (get("SLACK_BOT_TOKEN"), get("SLACK_SIGNING_SECRET")) {
            (Some(bot_token), Some(signing_secret)) => {
                let tz_name =
                    get("DISPLAY_TIMEZONE").unwrap_or_else(|| DEFAULT_DISPLAY_TIMEZONE.to_string());
                let display_timezone = tz_name
                    .parse::<Tz>()
                    .map_err(|e| format!("DISPLAY_TIMEZONE: {e}"))?;
                Some(SlackConfig {
                    bot_token,
                    signing_secret,
                    history_limit: parse_or(
                        &get,
                        "SLACK_HISTORY_LIMIT",
                        DEFAULT_SLACK_HISTORY_LIMIT,
                    )?,
                    display_timezone,
                })
            }
            (Some(_), None) => {
                return Err("SLACK_SIGNING_SECRET: required when SLACK_BOT_TOKEN is set".into());
            }
            (None, Some(_)) => {
                return Err("SLACK_BOT_TOKEN: required when SLACK_SIGNING_SECRET is set".into());
            }
            (None, None) => None,
        };

        let ollama_url = get("OLLAMA_URL").unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
        url::Url::parse(&ollama_url).map_err(|e| format!("OLLAMA_URL: {e}"))?;

        Ok(Self {
            port: parse_or(&get, "PORT", DEFAULT_PORT)?,
            ollama_url,
            ollama_model: get("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            history_limit: parse_or(&get, "HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT)?,
            pipeline,
            slack,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|e| format!("{key}: {e}")),
        None => Ok(default),
    }
}

fn parse_bool<G>(get: &G, key: &str) -> Result<bool, String>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(format!("{key}: expected a boolean, got '{other}'")),
        },
    }
}

fn positive(key: &str, value: usize) -> Result<usize, String> {
    if value == 0 {
        Err(format!("{key}: must be at least 1"))
    } else {
        Ok(value)
    }
}
