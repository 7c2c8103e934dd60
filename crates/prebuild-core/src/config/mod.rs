//! Configuration system for the pre-build resolver.
//! Three layered property sources resolved with fixed precedence:
//! command line > settings file > environment/server. Compiled defaults
//! for the analysis constants live in `AnalysisConfig`.

pub mod analysis_config;
pub mod loader;
pub mod property_source;
pub mod resolver;
pub mod scan_settings;

pub use analysis_config::{AnalysisConfig, Language};
pub use property_source::{PropertySource, SourceKind, PRECEDENCE};
pub use resolver::PropertyResolver;
pub use scan_settings::ScanSettings;
