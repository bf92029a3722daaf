// Copyright 2026 Pitchbot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pitchbot — persona-grounded sales-page chat responder.
//!
//! Extracts structured marketing copy from a sales-page URL into a
//! [`product::ProductRecord`] using ordered regex rules with graceful
//! degradation to defaults, then answers free-text questions about the
//! product through a remote generative model or, whenever that fails, a
//! deterministic keyword-routed fallback composer. Replies are always
//! Portuguese and the system always degrades rather than failing.

pub mod cache;
pub mod config;
pub mod extraction;
pub mod fetch;
pub mod product;
pub mod responder;
pub mod rest;
