pub mod cust_error;
pub mod weight;
pub mod vertex_set;
pub mod graph;
pub mod clique;
pub mod initialization;
pub mod branching;
pub mod config;
pub mod stop;
pub mod mwc_instance;
pub mod bounded_search;
pub mod generator;
pub mod log;
