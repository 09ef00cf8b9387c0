pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use app::build_pipeline;
pub use core::{catalog::CommodityCatalog, pipeline::MatchPipeline};
pub use domain::model::{BusinessQuery, CommodityCode, MatchResult, Solicitation};
pub use domain::ports::{Completion, CompletionModel, ConfigProvider, SolicitationSource};
pub use utils::error::{Result, ScoutError};
