pub mod graph_annotator_test;
pub mod paths_test;
