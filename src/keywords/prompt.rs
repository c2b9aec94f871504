//! Prompt construction for keyword generation.

use serde::Deserialize;

pub const SYSTEM_PROMPT: &str = r#"Return only valid JSON: [{"keyword": "..."}]"#;

const NOT_SPECIFIED: &str = "Not specified";

/// Campaign metadata collected alongside the PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDetails {
    pub client_name: String,
    pub campaign_name: String,
    pub campaign_url: String,
    pub seed_keywords: String,
}

fn or_not_specified(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NOT_SPECIFIED
    } else {
        trimmed
    }
}

/// Builds the user prompt from the campaign details and landing page copy.
pub fn build_prompt(details: &CampaignDetails, landing_page_copy: &str) -> String {
    format!(
        r#"You are an expert SEO and PR specialist. Based on the campaign information, generate 15–20 Google search keywords that journalists, bloggers, and website owners might use to find coverage related to this campaign.

Campaign Details:
- Client Name: {client}
- Campaign Name: {campaign}
- Campaign URL: {url}
- Seed Keywords: {seeds}

Landing Page Copy:
{copy}

Focus on:
- News-worthy angles, industry terms
- Location-based queries for Ireland
- Stats / data / ranking comparisons
- Synonyms (affordable, cheapest, budget, low-cost)

Return ONLY valid JSON array, like:
[
  {{"keyword": "keyword phrase"}},
  {{"keyword": "another keyword phrase"}}
]"#,
        client = or_not_specified(&details.client_name),
        campaign = or_not_specified(&details.campaign_name),
        url = or_not_specified(&details.campaign_url),
        seeds = or_not_specified(&details.seed_keywords),
        copy = landing_page_copy,
    )
}
