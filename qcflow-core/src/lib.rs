//! QCFlow Core
//!
//! Core types shared by the QCFlow client crates.
//!
//! This crate contains:
//! - Domain types: job lifecycle, run parameters, log chunks, report index,
//!   QC summaries and the authenticated session
//! - DTOs: request and response bodies exchanged with the pipeline and auth services

pub mod domain;
pub mod dto;
mod types;
