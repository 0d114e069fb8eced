use crate::canvas::raster::Raster;
use crate::recognize::error::RecognizeError;
use crate::recognize::vars::VariableEnvironment;
use crate::recognize::wire::{encode_request, parse_response, RecognitionRecord};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use url::Url;

pub const CALCULATE_PATH: &str = "calculate";
const MAX_ERROR_BODY: usize = 200;

/// Resolve `<base>/calculate`, keeping any path prefix on the base.
pub fn calculate_url(base: &str) -> Result<Url> {
    let mut url = Url::parse(base.trim()).with_context(|| format!("invalid api url '{base}'"))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.join(CALCULATE_PATH)
        .with_context(|| format!("join {CALCULATE_PATH} onto '{base}'"))
}

/// Blocking client for the recognition service. Run it off the UI thread.
#[derive(Debug, Clone)]
pub struct RecognitionClient {
    client: Client,
    endpoint: Url,
}

impl RecognitionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let endpoint = calculate_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("math-canvas recognizer")
            .build()
            .context("build http client")?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Snapshot the raster and send it with the current variables.
    pub fn submit(
        &self,
        raster: &Raster,
        vars: &VariableEnvironment,
    ) -> Result<Vec<RecognitionRecord>, RecognizeError> {
        let image = raster.to_data_uri()?;
        self.submit_image(&image, vars)
    }

    pub fn submit_image(
        &self,
        image: &str,
        vars: &VariableEnvironment,
    ) -> Result<Vec<RecognitionRecord>, RecognizeError> {
        let body = encode_request(image, vars)?;
        tracing::debug!(
            endpoint = %self.endpoint,
            bytes = body.len(),
            vars = vars.len(),
            "sending recognition request"
        );
        let resp = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;
        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            let mut body = text.trim().to_string();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| body.is_char_boundary(*i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(RecognizeError::Status {
                code: status.as_u16(),
                body,
            });
        }
        let records = parse_response(&text)?;
        tracing::info!(records = records.len(), "recognition succeeded");
        Ok(records)
    }
}
