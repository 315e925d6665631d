use serde::{Deserialize, Serialize};

/// Async text-generation submission.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateTextRequest {
    pub prompt: String,
    pub params: SamplingParams,
    pub trusted_workers: bool,
    pub slow_workers: bool,
    pub models: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SamplingParams {
    pub max_context_length: u32,
    pub max_length: u32,
    pub rep_pen: f32,
    pub rep_pen_range: u32,
    pub rep_pen_slope: f32,
    pub temperature: f32,
    pub tfs: f32,
    pub top_a: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub typical: f32,
    pub stop_sequence: Vec<String>,
}

impl SamplingParams {
    /// The fixed conversational sampler, with the per-message response
    /// length and temperature plugged in.
    pub fn conversational(max_length: u32, temperature: f32) -> Self {
        Self {
            max_context_length: 4096,
            max_length,
            rep_pen: 1.2,
            rep_pen_range: 2048,
            rep_pen_slope: 0.7,
            temperature,
            tfs: 0.97,
            top_a: 0.0,
            top_k: 60,
            top_p: 0.95,
            typical: 1.0,
            stop_sequence: ["User:", "\nUser:", "\n\nUser:", "Human:", "\nHuman:", "\n\n"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub faulted: bool,
    #[serde(default)]
    pub generations: Vec<Generation>,
}

#[derive(Debug, Deserialize)]
pub struct Generation {
    pub text: String,
}

/// What the gateway hands back to the chat path. `fallback` marks a
/// canned line served after every model was exhausted.
#[derive(Debug, Clone)]
pub struct GeneratedReply {
    pub text: String,
    pub fallback: bool,
}
