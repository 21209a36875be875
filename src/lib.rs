//! # Resumen Noticias
//!
//! Aggregates labour and economy news from Mundo Gremial, Ámbito and
//! El Cronista, summarizes each article with LSA sentence ranking and
//! assembles everything into one Markdown digest.
//!
//! The entry point is [`pipeline::Pipeline::run`], which returns a
//! [`models::RunReport`] whose `artifact` is the path of the written digest.
//!
//! ## Modules
//!
//! - [`scrapers`]: per-source listing discovery
//! - [`extract`]: article body extraction
//! - [`summary`]: Spanish tokenization and LSA summarization
//! - [`dedupe`]: exact-title deduplication
//! - [`outputs`]: Markdown digest and JSON run report
//! - [`pipeline`]: orchestration

pub mod cli;
pub mod config;
pub mod dedupe;
pub mod error;
pub mod extract;
pub mod http;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod scrapers;
pub mod summary;
pub mod utils;
