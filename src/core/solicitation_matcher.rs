use crate::core::reply::parse_json_list_reply;
use crate::domain::model::{CommodityCode, Solicitation};
use crate::domain::ports::Completion;
use serde::Deserialize;

/// A title the model picked. Any URL it echoes back is ignored.
#[derive(Debug, Deserialize)]
struct Candidate {
    title: String,
}

/// Picks the live solicitations that fit a business's codes.
///
/// Best effort: every failure path yields an empty list.
pub struct SolicitationMatcher<'a> {
    completion: &'a Completion,
}

impl<'a> SolicitationMatcher<'a> {
    pub fn new(completion: &'a Completion) -> Self {
        Self { completion }
    }

    pub async fn match_solicitations(
        &self,
        codes: &[CommodityCode],
        live: &[Solicitation],
    ) -> Vec<Solicitation> {
        let Some(model) = self.completion.model() else {
            return Vec::new();
        };

        if live.is_empty() {
            tracing::info!("📭 No live solicitations to match against");
            return Vec::new();
        }

        let prompt = build_prompt(codes, live);
        let text = match model.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("❌ Error in solicitation matcher: {}", e);
                return Vec::new();
            }
        };

        match parse_json_list_reply::<Candidate>(&text) {
            Ok(candidates) => {
                let titles: Vec<&str> = candidates.iter().map(|c| c.title.as_str()).collect();
                let matched = resolve_titles(&titles, live);
                tracing::info!(
                    "🎯 AI proposed {} solicitations, {} resolved against the live list",
                    candidates.len(),
                    matched.len()
                );
                matched
            }
            Err(e) => {
                tracing::error!("❌ Solicitation matcher could not parse reply: {}", e);
                Vec::new()
            }
        }
    }
}

/// Maps each proposed title to the first live solicitation whose title is
/// equal after trimming. The live entry is returned as-is, URL included.
pub fn resolve_titles(titles: &[&str], live: &[Solicitation]) -> Vec<Solicitation> {
    titles
        .iter()
        .filter_map(|title| {
            let wanted = title.trim();
            live.iter().find(|s| s.title.trim() == wanted).cloned()
        })
        .collect()
}

fn build_prompt(codes: &[CommodityCode], live: &[Solicitation]) -> String {
    let codes_text = codes
        .iter()
        .map(|c| format!("- {}: {}", c.code, c.description))
        .collect::<Vec<_>>()
        .join("\n");
    let titles_text = live
        .iter()
        .map(|s| format!("- {}", s.title))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a procurement expert. I will give you a list of "Service Codes" that a business provides. I will also give you a list of "Open Contracts" from the city.

Your job is to identify which "Open Contracts" are a good match for the "Service Codes".
HERE ARE THE BUSINESS'S SERVICE CODES:
{codes_text}

HERE ARE THE LIVE, OPEN CONTRACTS:
{titles_text}

Please analyze both lists and return a JSON array of *only* the matching "Open Contracts".
Each item in the array should be an object with a "title" and a "url" (from the list I gave you).

If no contracts match, you MUST return an empty array [].
Return *only* the JSON array."#
    )
}
