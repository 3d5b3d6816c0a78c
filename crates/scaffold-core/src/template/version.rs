//! Version comparison for CLI and template compatibility

use semver::Version;

/// Compare the CLI version against the version a template manifest declares.
/// Returns a warning message if the CLI is older than the template expects.
pub fn check_compatibility(cli_version: &str, template_version: &str) -> Option<String> {
    let cli_ver = match Version::parse(cli_version) {
        Ok(v) => v,
        Err(_) => return None, // Can't compare, skip warning
    };

    let template_ver = match Version::parse(template_version) {
        Ok(v) => v,
        Err(_) => return None, // Can't compare, skip warning
    };

    if cli_ver < template_ver {
        Some(format!(
            "Warning: this template was designed for version {} or newer.\n\
             You are running version {}.",
            template_version, cli_version
        ))
    } else {
        None
    }
}
