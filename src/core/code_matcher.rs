use crate::core::catalog::CommodityCatalog;
use crate::core::reply::parse_json_reply;
use crate::domain::model::CommodityCode;
use crate::domain::ports::Completion;
use crate::utils::error::Result;

/// Shortlists catalog codes for a free-text business description.
pub struct CodeMatcher<'a> {
    catalog: &'a CommodityCatalog,
    completion: &'a Completion,
}

impl<'a> CodeMatcher<'a> {
    pub fn new(catalog: &'a CommodityCatalog, completion: &'a Completion) -> Self {
        Self {
            catalog,
            completion,
        }
    }

    pub fn mock_codes() -> Vec<CommodityCode> {
        vec![CommodityCode::new("915-00", "Mock AI Code (e.g., Catering)")]
    }

    pub fn failure_codes(reason: &str) -> Vec<CommodityCode> {
        vec![CommodityCode::new(
            "ERROR",
            format!("AI call failed: {}", reason),
        )]
    }

    pub async fn match_codes(&self, description: &str) -> Vec<CommodityCode> {
        let Some(model) = self.completion.model() else {
            tracing::warn!("🤖 AI model not configured, returning mock codes");
            return Self::mock_codes();
        };

        let prompt = self.build_prompt(description);
        let outcome: Result<Vec<CommodityCode>> = match model.generate(&prompt).await {
            Ok(text) => parse_json_reply(&text),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(codes) => {
                tracing::info!("🏷️ AI matched {} commodity codes", codes.len());
                codes
            }
            Err(e) => {
                tracing::error!("❌ Error calling AI for code matching: {}", e);
                Self::failure_codes(&e.to_string())
            }
        }
    }

    fn build_prompt(&self, description: &str) -> String {
        format!(
            r#"You are a procurement expert for a city purchasing department. I will give you a user's simple business description and a list of official commodity codes.
Your job is to return a JSON array of the top 10-15 codes that are the best match.

HERE IS THE LIST OF CODES:
{codes}

HERE IS THE USER'S DESCRIPTION:
"{description}"

Return *only* the JSON array of matching codes (with "code" and "description" keys). Do not add any other text or "```json" markers."#,
            codes = self.catalog.render_as_text(),
            description = description,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::ScriptedModel;

    fn catalog() -> CommodityCatalog {
        CommodityCatalog::new(vec![
            CommodityCode::new("101-01", "Plumbing"),
            CommodityCode::new("915-00", "CATERING SERVICES"),
        ])
    }

    #[tokio::test]
    async fn test_unconfigured_returns_mock_record() {
        let catalog = catalog();
        let completion = Completion::Unconfigured;

        let codes = CodeMatcher::new(&catalog, &completion)
            .match_codes("plumbing work")
            .await;

        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].code, "915-00");
        assert_eq!(codes[0].description, "Mock AI Code (e.g., Catering)");
    }

    #[tokio::test]
    async fn test_prompt_embeds_catalog_and_description() {
        let catalog = catalog();
        let model = ScriptedModel::new().reply(r#"[{"code":"101-01","description":"Plumbing"}]"#);
        let completion = Completion::configured(model.clone());

        let codes = CodeMatcher::new(&catalog, &completion)
            .match_codes("Main Services: pipes.")
            .await;

        assert_eq!(codes, vec![CommodityCode::new("101-01", "Plumbing")]);
        assert_eq!(model.calls(), 1);
        let prompt = model.prompt(0);
        assert!(prompt.contains("101-01: Plumbing\n915-00: CATERING SERVICES"));
        assert!(prompt.contains("\"Main Services: pipes.\""));
        assert!(prompt.contains("top 10-15 codes"));
    }

    #[tokio::test]
    async fn test_fenced_reply_is_accepted() {
        let catalog = catalog();
        let model = ScriptedModel::new()
            .reply("```json\n[{\"code\":\"915-00\",\"description\":\"CATERING SERVICES\"}]\n```");
        let completion = Completion::configured(model);

        let codes = CodeMatcher::new(&catalog, &completion).match_codes("food").await;
        assert_eq!(codes[0].code, "915-00");
    }

    #[tokio::test]
    async fn test_call_failure_becomes_error_record() {
        let catalog = catalog();
        let model = ScriptedModel::new().fail("quota exceeded");
        let completion = Completion::configured(model.clone());

        let codes = CodeMatcher::new(&catalog, &completion).match_codes("food").await;

        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].code, "ERROR");
        assert!(codes[0].description.starts_with("AI call failed: "));
        assert!(codes[0].description.contains("quota exceeded"));
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_prose_reply_becomes_error_record() {
        let catalog = catalog();
        let model = ScriptedModel::new().reply("I think 915-00 fits best.");
        let completion = Completion::configured(model);

        let codes = CodeMatcher::new(&catalog, &completion).match_codes("food").await;
        assert_eq!(codes[0].code, "ERROR");
    }
}
