use crate::core::catalog::CommodityCatalog;
use crate::core::code_matcher::CodeMatcher;
use crate::core::profile_drafter::ProfileDrafter;
use crate::core::solicitation_matcher::SolicitationMatcher;
use crate::domain::model::{BusinessQuery, MatchResult};
use crate::domain::ports::{Completion, SolicitationSource};
use crate::utils::error::{Result, ScoutError};
use std::sync::Arc;
use std::time::Instant;

/// Runs the four stages for one business query.
///
/// Stages run one after another: codes, live listings, listing match,
/// profile. Each stage absorbs its own failures, so the only error `run`
/// returns is the missing-services validation fault.
#[derive(Clone)]
pub struct MatchPipeline {
    catalog: Arc<CommodityCatalog>,
    completion: Completion,
    source: Arc<dyn SolicitationSource>,
    portal_url: String,
}

impl MatchPipeline {
    pub fn new(
        catalog: Arc<CommodityCatalog>,
        completion: Completion,
        source: Arc<dyn SolicitationSource>,
        portal_url: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            completion,
            source,
            portal_url: portal_url.into(),
        }
    }

    pub fn catalog(&self) -> &CommodityCatalog {
        &self.catalog
    }

    pub fn completion(&self) -> &Completion {
        &self.completion
    }

    pub fn portal_url(&self) -> &str {
        &self.portal_url
    }

    pub async fn run(&self, query: &BusinessQuery) -> Result<MatchResult> {
        if !query.has_services() {
            return Err(ScoutError::missing_services());
        }

        let started = Instant::now();
        let description = query.description();
        tracing::info!("📝 New request: {}", description);

        // 1. 商品代碼
        let codes = CodeMatcher::new(&self.catalog, &self.completion)
            .match_codes(&description)
            .await;
        tracing::debug!("Codes found: {:?}", codes);

        // 2. 即時標案
        let live = self.source.fetch_open(&self.portal_url).await;
        tracing::info!("🌐 Live solicitations found: {}", live.len());

        // 3. 代碼與標案配對
        let rfps = SolicitationMatcher::new(&self.completion)
            .match_solicitations(&codes, &live)
            .await;
        tracing::info!("🎯 Matched solicitations: {}", rfps.len());

        // 4. 廠商簡介
        let profile = ProfileDrafter::new(&self.completion)
            .draft(&query.name, &description, &codes)
            .await;
        tracing::debug!("Profile generated: {}", profile);

        tracing::info!(
            "✅ Pipeline finished in {:?} ({} codes, {} rfps)",
            started.elapsed(),
            codes.len(),
            rfps.len()
        );

        Ok(MatchResult {
            codes,
            rfps,
            profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{FixedSource, ScriptedModel};
    use crate::domain::model::{CommodityCode, Solicitation};

    fn plumbing_catalog() -> Arc<CommodityCatalog> {
        Arc::new(CommodityCatalog::new(vec![CommodityCode::new(
            "101-01", "Plumbing",
        )]))
    }

    #[tokio::test]
    async fn test_unconfigured_pipeline_degrades_gracefully() {
        let source = FixedSource::new(vec![Solicitation::new("Pipe Repair", "https://x/1")]);
        let pipeline = MatchPipeline::new(
            plumbing_catalog(),
            Completion::Unconfigured,
            Arc::new(source.clone()),
            "https://portal.example/open",
        );

        let result = pipeline
            .run(&BusinessQuery::new("plumbing work"))
            .await
            .unwrap();

        assert_eq!(
            result.codes,
            vec![CommodityCode::new("915-00", "Mock AI Code (e.g., Catering)")]
        );
        assert!(result.rfps.is_empty());
        assert_eq!(result.profile, "ERROR: AI model not configured.");
    }

    #[tokio::test]
    async fn test_empty_services_fails_before_any_stage() {
        let model = ScriptedModel::new().reply("[]");
        let source = FixedSource::new(vec![Solicitation::new("Pipe Repair", "https://x/1")]);
        let pipeline = MatchPipeline::new(
            plumbing_catalog(),
            Completion::configured(model.clone()),
            Arc::new(source.clone()),
            "https://portal.example/open",
        );

        let err = pipeline.run(&BusinessQuery::new("")).await.unwrap_err();

        assert!(err.is_input_fault());
        assert_eq!(model.calls(), 0);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_stages_run_in_order_and_fuse_outputs() {
        let model = ScriptedModel::new()
            .reply(r#"[{"code":"101-01","description":"Plumbing"}]"#)
            .reply(r#"[{"title":"Pipe Repair","url":"https://model/made/up"}]"#)
            .reply("Pipe Pros is available for subcontractor opportunities.");
        let source = FixedSource::new(vec![
            Solicitation::new("Pipe Repair", "https://portal.example/s/1"),
            Solicitation::new("Fleet Tires", "https://portal.example/s/2"),
        ]);
        let pipeline = MatchPipeline::new(
            plumbing_catalog(),
            Completion::configured(model.clone()),
            Arc::new(source.clone()),
            "https://portal.example/open",
        );

        let query = BusinessQuery::new("plumbing").with_name("Pipe Pros");
        let result = pipeline.run(&query).await.unwrap();

        assert_eq!(result.codes, vec![CommodityCode::new("101-01", "Plumbing")]);
        assert_eq!(
            result.rfps,
            vec![Solicitation::new("Pipe Repair", "https://portal.example/s/1")]
        );
        assert_eq!(
            result.profile,
            "Pipe Pros is available for subcontractor opportunities."
        );
        assert_eq!(model.calls(), 3);
        assert_eq!(source.calls(), 1);
        assert!(model.prompt(0).contains("LIST OF CODES"));
        assert!(model.prompt(1).contains("- Fleet Tires"));
        assert!(model.prompt(2).contains("\"Pipe Pros\""));
    }

    #[tokio::test]
    async fn test_error_sentinel_passes_through() {
        let model = ScriptedModel::new()
            .fail("upstream 500")
            .reply("[]")
            .reply("Profile text");
        let source = FixedSource::new(vec![Solicitation::new("Pipe Repair", "https://x/1")]);
        let pipeline = MatchPipeline::new(
            plumbing_catalog(),
            Completion::configured(model),
            Arc::new(source),
            "https://portal.example/open",
        );

        let result = pipeline.run(&BusinessQuery::new("plumbing")).await.unwrap();

        assert_eq!(result.codes.len(), 1);
        assert_eq!(result.codes[0].code, "ERROR");
        assert!(result.rfps.is_empty());
        assert_eq!(result.profile, "Profile text");
    }

    #[tokio::test]
    async fn test_empty_scrape_skips_matcher_call() {
        let model = ScriptedModel::new()
            .reply(r#"[{"code":"101-01","description":"Plumbing"}]"#)
            .reply("Profile text");
        let pipeline = MatchPipeline::new(
            plumbing_catalog(),
            Completion::configured(model.clone()),
            Arc::new(FixedSource::new(Vec::new())),
            "https://portal.example/open",
        );

        let result = pipeline.run(&BusinessQuery::new("plumbing")).await.unwrap();

        assert!(result.rfps.is_empty());
        assert_eq!(result.profile, "Profile text");
        assert_eq!(model.calls(), 2);
    }
}
