// SPDX-License-Identifier: PMPL-1.0-or-later
//! Conformancebot - Trusted Tester Conformance Evaluation Engine
//!
//! Part of the gitbot-fleet ecosystem. Conformancebot turns automated scanner
//! output, heuristic probe results and manual tester judgments into one
//! outcome per Trusted Tester test, then rolls those outcomes up into a
//! WCAG 2.1 / Section 508 conformance determination.
//!
//! ## Pipeline
//!
//! - **Catalog**: the 20 test categories, their tests, WCAG success criteria
//!   and ICT baseline names
//! - **Normalizer**: scanner rule ids, heuristic check names and manual
//!   actions mapped onto canonical test ids
//! - **Evaluators**: one pure decision function set per category
//! - **Session**: latest result per test id for the page under evaluation
//! - **Aggregator**: outcome counts, violation sets, conformance level and
//!   pre-export validation
//!
//! ## Outcome policy
//!
//! Absence of the triggering condition yields DNA before anything else is
//! looked at. A single failing element fails the test. PASS requires every
//! applicable element to pass, and missing evidence leaves the test NOT
//! TESTED.

pub mod aggregator;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluators;
pub mod evidence;
pub mod model;
pub mod normalizer;
pub mod report;
pub mod scanner;
pub mod session;
pub mod snapshot;

pub use error::{ConformanceError, Result};
