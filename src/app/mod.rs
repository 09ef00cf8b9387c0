// Application layer: wires configuration, adapters and the core pipeline together.

use crate::adapters::{gemini, source_from_settings};
use crate::core::catalog::CommodityCatalog;
use crate::core::pipeline::MatchPipeline;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use std::sync::Arc;

/// Loads the catalog once and builds a pipeline shared by every request.
pub fn build_pipeline<C: ConfigProvider>(config: &C) -> Result<MatchPipeline> {
    let catalog = Arc::new(CommodityCatalog::load(config.catalog_path()));
    let completion = gemini::completion_from_settings(&config.completion_settings())?;
    let source = source_from_settings(&config.source_settings())?;

    Ok(MatchPipeline::new(
        catalog,
        completion,
        source,
        config.portal_url(),
    ))
}
