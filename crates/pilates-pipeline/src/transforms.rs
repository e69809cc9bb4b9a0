//! Environment-variable expansion for path templates in the settings.
//!
//! `output_directory` may embed `$NAME` or `${NAME}` references. They are
//! resolved against the process environment before the output root is built;
//! unknown names are left untouched, as a POSIX shell's `expandvars` would.

use std::sync::OnceLock;

use regex::{Captures, Regex};

fn variable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$(?:\{([^}]*)\}|([A-Za-z0-9_]+))").expect("variable pattern is valid")
    })
}

/// Expand `$name` and `${name}` patterns in a string.
///
/// Each reference is replaced by `lookup(name)`. References for which
/// `lookup` returns `None` are left as-is.
pub fn expand_variables<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    variable_pattern()
        .replace_all(template, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            lookup(name).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Expand references using the process environment.
pub fn expand_env(template: &str) -> String {
    expand_variables(template, |name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn expand(template: &str, vars: &HashMap<String, String>) -> String {
        expand_variables(template, |name| vars.get(name).cloned())
    }

    #[test]
    fn expand_braced_variable() {
        let v = vars(&[("HOME", "/home/mock")]);
        assert_eq!(expand("${HOME}/pilates", &v), "/home/mock/pilates");
    }

    #[test]
    fn expand_bare_variable() {
        let v = vars(&[("HOME", "/home/mock")]);
        assert_eq!(expand("$HOME/pilates", &v), "/home/mock/pilates");
    }

    #[test]
    fn bare_name_stops_at_non_word_character() {
        let v = vars(&[("SCRATCH", "/s")]);
        assert_eq!(expand("$SCRATCH-runs/out", &v), "/s-runs/out");
    }

    #[test]
    fn expand_multiple_variables() {
        let v = vars(&[("ROOT", "/data"), ("USER", "alice")]);
        assert_eq!(expand("$ROOT/${USER}/output", &v), "/data/alice/output");
    }

    #[test]
    fn unknown_variables_are_left_verbatim() {
        let v = HashMap::new();
        let template = "$NOPE/and/${ALSO_NOPE}/x";
        assert_eq!(expand(template, &v), template);
    }

    #[test]
    fn lone_dollar_and_empty_braces_are_untouched() {
        let v = vars(&[("A", "1")]);
        assert_eq!(expand("cost $ 5 ${}", &v), "cost $ 5 ${}");
    }

    #[test]
    fn template_without_references_is_unchanged() {
        let v = vars(&[("A", "1")]);
        assert_eq!(expand("/plain/path", &v), "/plain/path");
    }

    #[test]
    fn expand_env_reads_process_environment() {
        // PATH is set in every test environment we run under.
        let path = std::env::var("PATH").unwrap();
        assert_eq!(expand_env("${PATH}"), path);
    }
}
