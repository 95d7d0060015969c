pub mod artifacts;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod latex;
pub mod naming;
pub mod paths;
pub mod processor;
pub mod prompts;
