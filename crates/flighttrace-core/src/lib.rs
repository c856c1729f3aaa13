pub mod cleaner;
pub mod config;
pub mod error;
pub mod frames;
pub mod normalize;
pub mod pipeline;
pub mod reducer;
pub mod scene;
pub mod time_resolver;
pub mod types;

pub use config::{PipelineConfig, TimeParsePolicy};
pub use error::{PipelineError, PipelineWarning, Stage};
pub use pipeline::{process_table, run_pipeline, PipelineOutput, PipelineReport};
pub use scene::Scene;
pub use types::{FlightSample, TimeValue};
