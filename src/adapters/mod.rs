// Adapters layer: concrete implementations for external collaborators (scorer, diagnostics, input/output).

pub mod diagnostics;
pub mod records;
pub mod scorer;
pub mod storage;
