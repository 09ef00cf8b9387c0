use crate::domain::model::CommodityCode;
use crate::domain::ports::Completion;

pub const PROFILE_NOT_CONFIGURED: &str = "ERROR: AI model not configured.";
pub const PROFILE_FAILED: &str = "Error generating profile.";

pub struct ProfileDrafter<'a> {
    completion: &'a Completion,
}

impl<'a> ProfileDrafter<'a> {
    pub fn new(completion: &'a Completion) -> Self {
        Self { completion }
    }

    /// Always returns text; failures come back as fixed messages.
    pub async fn draft(&self, name: &str, description: &str, codes: &[CommodityCode]) -> String {
        let Some(model) = self.completion.model() else {
            return PROFILE_NOT_CONFIGURED.to_string();
        };

        let codes_text = codes
            .iter()
            .map(|c| format!("- {}: {}", c.code, c.description))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            r#"You are a professional business writer helping a small business write their official profile for a city vendor application.

I will give you the business's name, their description, and their official Commodity Codes.

Your job is to combine all this into a polished, professional profile.
The profile must sound confident and MUST mention that they are available for "subcontractor opportunities".

BUSINESS NAME:
"{name}"

USER'S DESCRIPTION:
"{description}"

THEIR CODES:
{codes_text}

Return *only* the single paragraph of text for their new profile."#
        );

        match model.generate(&prompt).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::error!("❌ Error calling AI profile builder: {}", e);
                PROFILE_FAILED.to_string()
            }
        }
    }
}
