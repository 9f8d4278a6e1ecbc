use anyhow::Result;
use regex::Regex;
use std::env;
use tracing::{debug, warn};

/// Substitute environment variables written as `${VAR}` or
/// `${VAR:-default}`.
///
/// Unset variables without a default keep their placeholder; validation
/// reports them later instead of failing the load outright.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::-([^}]*))?\}").expect("static regex");
    let mut result = content.to_string();

    for caps in re.captures_iter(content) {
        let placeholder = caps.get(0).expect("full match").as_str();
        let var_name = caps.get(1).expect("variable name").as_str();
        let fallback = caps.get(2).map(|m| m.as_str());

        match env::var(var_name) {
            Ok(value) => {
                debug!(var = var_name, "substituting environment variable");
                result = result.replace(placeholder, &value);
            }
            Err(_) => match fallback {
                Some(fallback) => {
                    debug!(var = var_name, fallback, "using inline default");
                    result = result.replace(placeholder, fallback);
                }
                None => {
                    warn!(var = var_name, "environment variable not set");
                }
            },
        }
    }

    Ok(result)
}

/// Check whether a string still contains unresolved `${VAR}` placeholders
pub fn has_unresolved_env_vars(content: &str) -> bool {
    let re = Regex::new(r"\$\{\w+\}").expect("static regex");
    re.is_match(content)
}
