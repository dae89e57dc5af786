pub mod enricher;
