pub mod generation;
pub mod media;
pub mod research;

pub use generation::{GeneratedPost, GenerationInput, GenerationService};
pub use media::MediaStore;
pub use research::ResearchService;
