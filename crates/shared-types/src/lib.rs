pub mod output;
pub mod persona;
pub mod types;

pub use output::{ExtractedSection, InsightOutput, RunMetadata, SubsectionAnalysis};
pub use persona::{JobToBeDone, Persona, PersonaContext};
pub use types::{ScoredItem, Section, Subsection, TextSpan};
