// Library for tests to access modules

pub mod alias;
pub mod chart;
pub mod cli;
pub mod cluster_exec;
pub mod config;
pub mod dot;
pub mod error;
pub mod metrics;
pub mod models;
pub mod render;
