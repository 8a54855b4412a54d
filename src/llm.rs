use crate::error::{ChlogError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LLM_REPO_ID: &str = "mistralai/Mistral-7B-Instruct-v0.2";
pub const TOKEN_ENV: &str = "HUGGINGFACEHUB_API_TOKEN";

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";
const DEFAULT_MAX_NEW_TOKENS: u32 = 128;
const DEFAULT_TEMPERATURE: f32 = 0.5;

const PROMPT_TEMPLATE: &str = "\
commit message: {commit_message} | diff: {diff}

Given the commit message and the diff, your task is to generate a short summary of the commit.
First provide a short (10 words or less) high-level summary of the changes. Then provide a
more detailed (2-5 sentences) explanation. Make sure to mention which files were changed,
the reason for the changes, and how the changes might impact a user. Assume the user has some
knowledge of the project and its technologies. Do not explicitly mention the commit message or
the diff. Use proper spelling and grammar, and only write in complete sentences.
Write in the tone of a software engineer. Write confidently - avoid words like 'likely' and 'may'.
Write your response in the following format and make sure to use full sentences:

Summary:
    high-level summary of the changes
Changes:
    2-5 sentence explanation
";

/// Substitute a commit message and diff description into the prompt template.
pub fn render_prompt(commit_message: &str, diff: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{commit_message}", commit_message)
        .replace("{diff}", diff)
}

/// Seam between the changelog pipeline and the model endpoint.
pub trait LlmClient {
    /// Generate the raw free-text summary for one commit.
    fn summarize(&self, commit_message: &str, diff: &str) -> Result<String>;
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct Generation {
    generated_text: String,
}

/// Blocking client for the HuggingFace Inference API.
pub struct HfEndpoint {
    repo_id: String,
    base_url: String,
    token: Option<String>,
    max_new_tokens: u32,
    temperature: f32,
    http: reqwest::blocking::Client,
}

impl HfEndpoint {
    /// Build a client for `repo_id`, reading the API token from the
    /// `HUGGINGFACEHUB_API_TOKEN` environment variable when present.
    pub fn new(repo_id: &str) -> Self {
        Self {
            repo_id: repo_id.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            token: std::env::var(TOKEN_ENV).ok(),
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Point the client at a different endpoint root.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

impl LlmClient for HfEndpoint {
    fn summarize(&self, commit_message: &str, diff: &str) -> Result<String> {
        let prompt = render_prompt(commit_message, diff);
        let url = format!("{}/{}", self.base_url, self.repo_id);

        let mut request = self.http.post(&url).json(&GenerationRequest {
            inputs: &prompt,
            parameters: GenerationParameters {
                max_new_tokens: self.max_new_tokens,
                temperature: self.temperature,
                return_full_text: false,
            },
        });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ChlogError::Llm(format!(
                "{} returned {status}: {}",
                self.repo_id,
                body.trim()
            )));
        }

        let generations: Vec<Generation> = serde_json::from_str(&body)?;
        generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| ChlogError::Llm(format!("{} returned no generations", self.repo_id)))
    }
}
