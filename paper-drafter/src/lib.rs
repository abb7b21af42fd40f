pub mod types;
pub mod config;
pub mod traits;
pub mod fetcher;
pub mod parser;
pub mod sources;
pub mod coverage;
pub mod llm_adapter;
pub mod scorer;
pub mod selector;
pub mod drafter;
pub mod assembler;
pub mod category;
pub mod writer;
pub mod pipeline;

pub use types::*;
pub use config::DrafterConfig;
pub use traits::{LanguageModel, PaperSource};
pub use parser::PaperParser;
pub use sources::{ArxivSource, StaticPaperSource};
pub use coverage::CoverageIndex;
pub use llm_adapter::{AnthropicClient, MockLanguageModel};
pub use scorer::Scorer;
pub use selector::Selector;
pub use drafter::Drafter;
pub use pipeline::{ArticlePipeline, PipelineOutcome, PipelineRequest};
