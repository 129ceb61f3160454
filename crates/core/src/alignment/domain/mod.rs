pub mod alignment_run;
pub mod discrepancy;
pub mod discrepancy_builder;
pub mod normalizer;
pub mod position_map;
pub mod sequence_matcher;
