use std::sync::OnceLock;

use regex::{Captures, Regex};

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `{{ env.VAR }}` with an optional `| default("fallback")` clause
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("must be valid regex")
    })
}

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// A `{{ env.VAR | default("fallback") }}` form substitutes the fallback
/// when the variable is unset. TOML comment lines are passed through
/// untouched so commented-out secrets do not fail the load.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut missing: Option<String> = None;

    let expanded: Vec<String> = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_owned();
            }

            placeholder_re()
                .replace_all(line, |caps: &Captures<'_>| {
                    let var = &caps[1];
                    std::env::var(var).unwrap_or_else(|_| match caps.get(2) {
                        Some(default) => default.as_str().to_owned(),
                        None => {
                            missing.get_or_insert_with(|| var.to_owned());
                            String::new()
                        }
                    })
                })
                .into_owned()
        })
        .collect();

    if let Some(var) = missing {
        return Err(format!("environment variable not found: `{var}`"));
    }

    let mut output = expanded.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let input = "listen_address = \"127.0.0.1:8420\"";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn substitutes_set_variable() {
        temp_env::with_var("VOCALIS_TEST_KEY", Some("hf_abc"), || {
            let out = expand_env("api_key = \"{{ env.VOCALIS_TEST_KEY }}\"").unwrap();
            assert_eq!(out, "api_key = \"hf_abc\"");
        });
    }

    #[test]
    fn missing_variable_errors() {
        temp_env::with_var_unset("VOCALIS_TEST_MISSING", || {
            let err = expand_env("api_key = \"{{ env.VOCALIS_TEST_MISSING }}\"").unwrap_err();
            assert!(err.contains("VOCALIS_TEST_MISSING"));
        });
    }

    #[test]
    fn default_applies_when_unset() {
        temp_env::with_var_unset("VOCALIS_TEST_OPT", || {
            let out = expand_env("base = \"{{ env.VOCALIS_TEST_OPT | default(\"https://a.example.com\") }}\"").unwrap();
            assert_eq!(out, "base = \"https://a.example.com\"");
        });
    }

    #[test]
    fn set_variable_beats_default() {
        temp_env::with_var("VOCALIS_TEST_OPT", Some("real"), || {
            let out = expand_env("base = \"{{ env.VOCALIS_TEST_OPT | default(\"fallback\") }}\"").unwrap();
            assert_eq!(out, "base = \"real\"");
        });
    }

    #[test]
    fn comment_lines_are_skipped() {
        temp_env::with_var_unset("VOCALIS_TEST_MISSING", || {
            let input = "  # api_key = \"{{ env.VOCALIS_TEST_MISSING }}\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }

    #[test]
    fn trailing_newline_preserved() {
        let input = "a = 1\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }
}
