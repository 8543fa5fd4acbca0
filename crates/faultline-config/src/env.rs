use std::{borrow::Cow, sync::OnceLock};

use regex::{Captures, Regex};

/// Expand `{{ env.NAME }}` placeholders in raw TOML text
///
/// `{{ env.NAME | default("value") }}` falls back to `value` when `NAME` is
/// unset. Comment lines are left as written, so commented-out settings may
/// reference unset variables.
pub fn expand_env(input: &str) -> anyhow::Result<String> {
    let mut output = String::with_capacity(input.len());

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            output.push_str(line);
        } else {
            output.push_str(&expand_line(line)?);
        }
    }

    Ok(output)
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // 1: dotted key, 2: optional default("...") argument
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

fn expand_line(line: &str) -> anyhow::Result<Cow<'_, str>> {
    let mut failure = None;

    let expanded = placeholder().replace_all(line, |captures: &Captures<'_>| {
        let default = captures.get(2).map(|m| m.as_str());

        resolve(&captures[1], default).unwrap_or_else(|e| {
            failure.get_or_insert(e);
            String::new()
        })
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(expanded),
    }
}

fn resolve(key: &str, default: Option<&str>) -> anyhow::Result<String> {
    let Some(name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        anyhow::bail!("unsupported placeholder `{key}`, only `env.NAME` is allowed");
    };

    match (std::env::var(name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => anyhow::bail!("environment variable `{name}` is not set"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "[normalizer]\nmapper_adapter = false\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn expands_set_variable() {
        temp_env::with_var("FAULTLINE_SCHEMA_MESSAGE", Some("Bad input"), || {
            let result = expand_env("message = \"{{ env.FAULTLINE_SCHEMA_MESSAGE }}\"").unwrap();
            assert_eq!(result, "message = \"Bad input\"");
        });
    }

    #[test]
    fn expands_several_placeholders_on_one_line() {
        temp_env::with_vars([("FL_A", Some("a")), ("FL_B", Some("b"))], || {
            let result = expand_env("filter = \"{{ env.FL_A }},{{env.FL_B}}\"").unwrap();
            assert_eq!(result, "filter = \"a,b\"");
        });
    }

    #[test]
    fn unset_variable_is_an_error() {
        temp_env::with_var_unset("FL_UNSET", || {
            let err = expand_env("filter = \"{{ env.FL_UNSET }}\"").unwrap_err();
            assert!(err.to_string().contains("FL_UNSET"));
        });
    }

    #[test]
    fn default_applies_only_when_unset() {
        temp_env::with_var_unset("FL_FILTER", || {
            let result = expand_env("filter = \"{{ env.FL_FILTER | default(\"warn\") }}\"").unwrap();
            assert_eq!(result, "filter = \"warn\"");
        });
        temp_env::with_var("FL_FILTER", Some("debug"), || {
            let result = expand_env("filter = \"{{ env.FL_FILTER | default(\"warn\") }}\"").unwrap();
            assert_eq!(result, "filter = \"debug\"");
        });
    }

    #[test]
    fn other_scopes_are_rejected() {
        let err = expand_env("x = \"{{ vault.TOKEN }}\"").unwrap_err();
        assert!(err.to_string().contains("only `env.NAME`"));
    }

    #[test]
    fn comments_are_not_expanded() {
        temp_env::with_var_unset("FL_UNSET", || {
            let input = "  # message = \"{{ env.FL_UNSET }}\"\nlog_untrivial = true";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }
}
