//! Shared constants for the pre-build analysis resolver.
//!
//! Names agreed with the build driver live here. Anything a deployment may
//! want to change is also exposed through `AnalysisConfig`; these values are
//! only the compiled defaults.

// ---- Setting keys ----

/// Setting that carries the analysis working directory. Empty or absent
/// means analysis is not active for this build.
pub const DEFAULT_TEMP_PATH_KEY: &str = "sonar.temp.path";

/// Required project key setting.
pub const PROJECT_KEY_SETTING: &str = "sonar.projectKey";

/// Optional project name setting.
pub const PROJECT_NAME_SETTING: &str = "sonar.projectName";

/// Optional project version setting.
pub const PROJECT_VERSION_SETTING: &str = "sonar.projectVersion";

/// Verbose logging switch.
pub const VERBOSE_SETTING: &str = "sonar.verbose";

/// Regex used to recognise test projects by file name.
pub const TEST_PROJECT_PATTERN_SETTING: &str = "sonar.msbuild.testProjectPattern";

/// Template for the republished diagnostic-log setting. `{lang}` is
/// replaced by the language key (`cs`, `vbnet`).
pub const DEFAULT_REPORT_SETTING_TEMPLATE: &str = "sonar.{lang}.roslyn.reportFilePath";

/// Environment variable holding JSON-encoded server/environment settings.
pub const SCANNER_PARAMS_ENV_VAR: &str = "SONARQUBE_SCANNER_PARAMS";

// ---- File names ----

/// Diagnostic log written by the compiler under the target directory.
pub const DEFAULT_ERROR_LOG_FILE_NAME: &str = "SonarQube.Roslyn.ErrorLog.json";

/// Analyzer assemblies shipped with the scanner, in the order they are added.
pub const DEFAULT_WELL_KNOWN_ANALYZERS: &[&str] = &["SonarLint.dll", "SonarLint.CSharp.dll"];

/// Additional files shipped with the scanner.
pub const DEFAULT_WELL_KNOWN_ADDITIONAL_FILES: &[&str] = &["SonarLint.xml"];

/// Sub-directory of the working path holding downloaded configuration.
pub const DEFAULT_CONF_DIR_NAME: &str = "conf";

/// Rule-set file name prefix; the full name is `<prefix><lang>.ruleset`.
pub const DEFAULT_RULESET_PREFIX: &str = "SonarQubeRoslyn-";

/// Rule-set file extension.
pub const RULESET_EXTENSION: &str = "ruleset";

/// Default test project name pattern (case-insensitive).
pub const DEFAULT_TEST_PROJECT_PATTERN: &str = r"[^\\/]*test[^\\/]*$";

/// MSTest project type GUID.
pub const MSTEST_PROJECT_TYPE_GUID: &str = "3AC096D0-A1C2-E12C-1390-A8335801FDAB";

// ---- Build unit property and item names ----

pub const PROP_ERROR_LOG: &str = "ErrorLog";
pub const PROP_RESOLVED_RULESET: &str = "ResolvedCodeAnalysisRuleset";
pub const PROP_TARGET_DIR: &str = "TargetDir";
pub const PROP_LANGUAGE: &str = "Language";
pub const PROP_EXCLUDE: &str = "SonarQubeExclude";
pub const PROP_TEST_PROJECT: &str = "SonarQubeTestProject";
pub const PROP_PROJECT_TYPE_GUIDS: &str = "ProjectTypeGuids";
pub const PROP_TREAT_WARNINGS_AS_ERRORS: &str = "TreatWarningsAsErrors";
pub const PROP_WARNINGS_AS_ERRORS: &str = "WarningsAsErrors";

pub const ITEM_ANALYZER: &str = "Analyzer";
pub const ITEM_ADDITIONAL_FILES: &str = "AdditionalFiles";
