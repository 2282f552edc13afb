//! # kousei_core
//!
//! Grammar and style diagnostic rule engine for Japanese text.
//!
//! This crate provides:
//! - The [`Rule`] capability contract and the fixed-order [`RuleRegistry`]
//! - The [`RuleExecutor`] pipeline with per-rule failure isolation
//! - The [`aggregate`] step producing the final deduplicated diagnostic set
//! - The [`AnalysisSession`] binding one document version to one run
//!
//! ## Example
//!
//! ```rust,ignore
//! use kousei_core::{AdvancedRulesConfig, AnalysisSession};
//!
//! let session = AnalysisSession::new(AdvancedRulesConfig::default());
//! let analysis = session.analyze("file:///a.md", 1, text, tokens)?;
//! for diagnostic in analysis.to_plain_diagnostics() {
//!     println!("{}: {}", diagnostic.code, diagnostic.message);
//! }
//! ```

mod aggregator;
mod config;
mod context;
mod diagnostic;
mod error;
mod executor;
mod lookup;
mod registry;
mod rule;
pub mod rules;
mod session;

pub use aggregator::{aggregate, to_plain};
pub use config::{AdvancedRulesConfig, DetectionLevel, RuleToggles};
pub use context::RuleContext;
pub use diagnostic::{AdvancedDiagnostic, Diagnostic, ErrorKind, Severity, SOURCE_TAG};
pub use error::EngineError;
pub use executor::RuleExecutor;
pub use lookup::{LookupError, NoopTermLookup, TermEntry, TermLookup};
pub use registry::RuleRegistry;
pub use rule::{Rule, RuleResult};
pub use session::{AnalysisSession, DocumentAnalysis};
