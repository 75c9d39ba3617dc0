use std::fmt;
use std::time::Duration;

use derive_builder::Builder;

use crate::{SpeechEngine, SpeechGenerationError};

use super::types::{GenerateContentRequest, GenerateContentResponse};

/// Model used for speech generation unless overridden.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variables checked for the API key, in order.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Parameters for configuring the Gemini engine.
#[derive(Clone, Builder)]
#[builder(default)]
pub struct GeminiParams {
    /// API key. `None` is accepted at construction; requests then fail with
    /// [`SpeechGenerationError::MissingApiKey`].
    #[builder(setter(into, strip_option))]
    pub api_key: Option<String>,
    #[builder(setter(into))]
    pub model: String,
    #[builder(setter(into))]
    pub base_url: String,
    /// Total request timeout, connect included.
    pub timeout: Duration,
}

impl Default for GeminiParams {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for GeminiParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiParams")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiParams {
    /// Defaults, with the API key read from `GEMINI_API_KEY` or `API_KEY`.
    pub fn from_env() -> Self {
        let api_key = first_api_key(&API_KEY_VARS, |var| std::env::var(var).ok());
        if api_key.is_none() {
            log::warn!("No Gemini API key found in {:?}", API_KEY_VARS);
        }
        Self {
            api_key,
            ..Self::default()
        }
    }
}

/// First non-empty value among `vars`, in order.
fn first_api_key<F>(vars: &[&str], lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    vars.iter().find_map(|var| lookup(var).filter(|value| !value.is_empty()))
}

/// Gemini text-to-speech engine.
///
/// Sends blocking HTTPS requests to the `generateContent` endpoint with audio
/// output enabled and returns the inline base64 PCM (24 kHz, mono, 16-bit).
///
/// ```rust,no_run
/// use voice_studio_rs::SpeechEngine;
/// use voice_studio_rs::engines::gemini::{GeminiEngine, GeminiParamsBuilder};
///
/// let params = GeminiParamsBuilder::default().api_key("my-key").build()?;
/// let engine = GeminiEngine::new(params)?;
/// let wav = engine.generate_wav("Hello, world!", "Kore")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct GeminiEngine {
    client: reqwest::blocking::Client,
    params: GeminiParams,
}

impl GeminiEngine {
    pub fn new(params: GeminiParams) -> Result<Self, SpeechGenerationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(params.timeout)
            .build()
            .map_err(|e| SpeechGenerationError::Transport(Box::new(e)))?;
        log::info!("Gemini engine ready (model {})", params.model);
        Ok(Self { client, params })
    }

    pub fn params(&self) -> &GeminiParams {
        &self.params
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.params.base_url.trim_end_matches('/'),
            self.params.model
        )
    }
}

impl SpeechEngine for GeminiEngine {
    fn generate_speech(
        &self,
        text: &str,
        voice_id: &str,
    ) -> Result<String, SpeechGenerationError> {
        let api_key = self
            .params
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(SpeechGenerationError::MissingApiKey)?;

        let body = GenerateContentRequest::speech(text, voice_id);
        log::debug!("POST {} (voice '{}')", self.endpoint(), voice_id);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .map_err(|e| SpeechGenerationError::Transport(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SpeechGenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response
            .text()
            .map_err(|e| SpeechGenerationError::Transport(Box::new(e)))?;
        let parsed: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|e| SpeechGenerationError::InvalidResponse(e.to_string()))?;

        let audio = parsed
            .into_audio_data()
            .ok_or(SpeechGenerationError::NoAudioData)?;
        log::debug!("Received {} base64 characters of audio", audio.len());
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    use super::*;

    /// Accept one HTTP request on a local port, answer it with `status` and
    /// `body`, and hand back the raw request text.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];

            let header_end = loop {
                let n = stream.read(&mut buf).unwrap();
                assert!(n > 0, "connection closed before headers were complete");
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let headers = String::from_utf8_lossy(&request[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map(|v| v.trim().parse::<usize>().unwrap())
                .unwrap_or(0);
            while request.len() < header_end + content_length {
                let n = stream.read(&mut buf).unwrap();
                assert!(n > 0, "connection closed before body was complete");
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (base_url, handle)
    }

    fn engine_for(base_url: String) -> GeminiEngine {
        let params = GeminiParams {
            api_key: Some("test-key".to_string()),
            base_url,
            timeout: Duration::from_secs(5),
            ..GeminiParams::default()
        };
        GeminiEngine::new(params).unwrap()
    }

    #[test]
    fn returns_inline_audio_from_successful_response() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"audio/L16;codec=pcm;rate=24000","data":"AQIDBA=="}}]}}]}"#,
        );

        let audio = engine_for(base_url).generate_speech("Hello", "Kore").unwrap();
        assert_eq!(audio, "AQIDBA==");

        let request = server.join().unwrap();
        assert!(request
            .starts_with("POST /v1beta/models/gemini-2.5-flash-preview-tts:generateContent "));
        assert!(request.to_lowercase().contains("x-goog-api-key: test-key"));
        assert!(request.contains(r#""text":"Say: Hello""#));
        assert!(request.contains(r#""voiceName":"Kore""#));
    }

    #[test]
    fn non_success_status_becomes_api_error() {
        let (base_url, server) = serve_once("403 Forbidden", r#"{"error":"denied"}"#);

        let err = engine_for(base_url).generate_speech("Hello", "Kore").unwrap_err();
        server.join().unwrap();
        match err {
            SpeechGenerationError::Api { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, r#"{"error":"denied"}"#);
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_body_becomes_invalid_response() {
        let (base_url, server) = serve_once("200 OK", "not json");

        let err = engine_for(base_url).generate_speech("Hello", "Kore").unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, SpeechGenerationError::InvalidResponse(_)));
    }

    #[test]
    fn response_without_audio_becomes_no_audio_data() {
        let (base_url, server) = serve_once("200 OK", r#"{"candidates":[]}"#);

        let err = engine_for(base_url).generate_speech("Hello", "Kore").unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, SpeechGenerationError::NoAudioData));
    }

    #[test]
    fn api_key_lookup_prefers_gemini_variable() {
        let lookup = |vars: &'static [(&'static str, &'static str)]| {
            move |name: &str| {
                vars.iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| value.to_string())
            }
        };

        let both = lookup(&[("GEMINI_API_KEY", "gemini"), ("API_KEY", "generic")]);
        assert_eq!(first_api_key(&API_KEY_VARS, both).as_deref(), Some("gemini"));

        let fallback = lookup(&[("API_KEY", "generic")]);
        assert_eq!(first_api_key(&API_KEY_VARS, fallback).as_deref(), Some("generic"));

        let empty_primary = lookup(&[("GEMINI_API_KEY", ""), ("API_KEY", "generic")]);
        assert_eq!(
            first_api_key(&API_KEY_VARS, empty_primary).as_deref(),
            Some("generic")
        );

        assert_eq!(first_api_key(&API_KEY_VARS, lookup(&[])), None);
    }

    #[test]
    fn builder_overrides_selected_fields() {
        let params = GeminiParamsBuilder::default()
            .api_key("secret")
            .model("gemini-2.5-pro-preview-tts")
            .build()
            .unwrap();

        assert_eq!(params.api_key.as_deref(), Some("secret"));
        assert_eq!(params.model, "gemini-2.5-pro-preview-tts");
        assert_eq!(params.base_url, DEFAULT_BASE_URL);
        assert_eq!(params.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn debug_output_hides_api_key() {
        let params = GeminiParamsBuilder::default().api_key("secret").build().unwrap();
        let printed = format!("{params:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn endpoint_joins_base_url_and_model() {
        let params = GeminiParamsBuilder::default()
            .base_url("http://localhost:8080/v1beta/")
            .build()
            .unwrap();
        let engine = GeminiEngine::new(params).unwrap();
        assert_eq!(
            engine.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash-preview-tts:generateContent"
        );
    }

    #[test]
    fn missing_api_key_fails_before_any_request() {
        for api_key in [None, Some(String::new())] {
            let params = GeminiParams {
                api_key,
                // Unroutable, so a request attempt would surface as a transport error.
                base_url: "http://127.0.0.1:9".to_string(),
                ..GeminiParams::default()
            };
            let engine = GeminiEngine::new(params).unwrap();
            let err = engine.generate_speech("Hello", "Kore").unwrap_err();
            assert!(matches!(err, SpeechGenerationError::MissingApiKey));
        }
    }
}
