pub mod catalog;
pub mod code_matcher;
pub mod pipeline;
pub mod profile_drafter;
pub mod reply;
pub mod solicitation_matcher;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{BusinessQuery, CommodityCode, MatchResult, Solicitation};
pub use crate::domain::ports::{Completion, CompletionModel, ConfigProvider, SolicitationSource};
pub use crate::utils::error::Result;
