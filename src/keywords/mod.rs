//! Keyword Generation Module
//!
//! Turns a campaign PDF plus metadata into candidate search keywords:
//! extract text, normalize it, build a prompt, ask the model, parse the
//! reply. Nothing here is cached; every call is a fresh computation.

mod model;
mod normalize;
mod parse;
mod pdf;
mod prompt;

pub use model::{completion_text, KeywordModel, OpenAiClient, MISSING_API_KEY};
pub use normalize::{normalize_text, truncate_chars, MAX_COPY_CHARS};
pub use parse::{parse_keywords, Keyword, MAX_KEYWORDS};
pub use pdf::extract_pdf_text;
pub use prompt::{build_prompt, CampaignDetails, SYSTEM_PROMPT};

#[cfg(test)]
pub(crate) use pdf::tests::pdf_with_text;

use tracing::info;

use crate::error::{AppError, Result};

/// Generates keywords from already-extracted document text.
pub async fn generate_from_text(
    model: &dyn KeywordModel,
    details: &CampaignDetails,
    raw_text: &str,
) -> Result<Vec<Keyword>> {
    let copy = normalize_text(raw_text);
    if copy.is_empty() {
        return Err(AppError::EmptyDocument);
    }
    let copy = truncate_chars(copy, MAX_COPY_CHARS);

    let prompt = build_prompt(details, &copy);
    let reply = model.complete(&prompt).await?;
    let keywords = parse_keywords(&reply)?;

    info!(
        campaign = %details.campaign_name,
        copy_chars = copy.chars().count(),
        keywords = keywords.len(),
        "generated keywords"
    );
    Ok(keywords)
}

/// Generates keywords from an uploaded PDF.
pub async fn generate_from_pdf(
    model: &dyn KeywordModel,
    details: &CampaignDetails,
    pdf_bytes: &[u8],
) -> Result<Vec<Keyword>> {
    let text = extract_pdf_text(pdf_bytes)?;
    generate_from_text(model, details, &text).await
}
