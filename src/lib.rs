//! logiscope
//! a read-only previewer for Logisim project XML: the document is parsed
//! into an immutable circuit model and redrawn in full on every change.

pub mod circuit;
pub mod schematic;
pub mod summary;
pub mod transforms;
pub mod viewport;

pub use circuit::{load_circuit, Circuit, ExtractError};
pub use schematic::Schematic;
pub use summary::CircuitSummary;
