mod preview;
mod state;

pub use preview::ImportPreview;
pub use state::ImportPipeline;
