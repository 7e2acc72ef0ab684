use anyhow::Context;
use reqwest::Url;

/// Builds the application URL a QR code points at: the hosted app's base URL
/// with the job identifier as a query parameter. Rendering the QR image is
/// left to whatever graphics layer embeds this.
pub fn apply_url(base_url: &str, job_id: &str) -> anyhow::Result<String> {
    let job_id = job_id.trim();
    anyhow::ensure!(!job_id.is_empty(), "Job identifier is required");

    let mut url = Url::parse(base_url.trim()).context("Invalid base URL")?;
    url.query_pairs_mut().append_pair("jobId", job_id);
    Ok(url.to_string())
}
