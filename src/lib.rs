//! Proposal Master - LLM-assisted grant proposal drafting
//!
//! Upload a funding announcement and a company introduction, let a language
//! model draft the proposal, then revise it one header-delimited section at
//! a time and export the result as markdown.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
