//! `${name}` substitution for configured command strings and tag names

use crate::error::{ReleaseError, Result};
use regex::{Captures, Regex};
use std::collections::BTreeMap;

/// Name/value pairs available to a template
pub type Bindings = BTreeMap<String, String>;

/// Replace every `${name}` reference in `template` with its binding.
///
/// Unresolved references are an error; nothing is left half-rendered.
///
/// # Example
/// ```
/// # use release_pipeline::template::{render, Bindings};
/// let mut bindings = Bindings::new();
/// bindings.insert("current_version".to_string(), "1.2.3".to_string());
/// assert_eq!(render("release-${current_version}", &bindings).unwrap(), "release-1.2.3");
/// ```
pub fn render(template: &str, bindings: &Bindings) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]*)\}")
        .map_err(|e| ReleaseError::config(format!("Invalid template pattern: {}", e)))?;

    if let Some(missing) = re
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .find(|name| !bindings.contains_key(name))
    {
        return Err(ReleaseError::UndefinedVariable {
            name: missing,
            template: template.to_string(),
        });
    }

    let rendered = re.replace_all(template, |caps: &Captures| bindings[&caps[1]].clone());
    Ok(rendered.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> Bindings {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_substitutes_all_references() {
        let b = bindings(&[("current_version", "1.2.3"), ("tag", "release-1.2.3")]);
        assert_eq!(
            render("git tag -a ${tag} -m 'Release ${current_version}'", &b).unwrap(),
            "git tag -a release-1.2.3 -m 'Release 1.2.3'"
        );
    }

    #[test]
    fn test_render_dotted_names() {
        let b = bindings(&[("current.version", "2.0")]);
        assert_eq!(render("release-${current.version}", &b).unwrap(), "release-2.0");
    }

    #[test]
    fn test_render_without_references() {
        assert_eq!(render("make test", &Bindings::new()).unwrap(), "make test");
    }

    #[test]
    fn test_render_undefined_variable_fails() {
        let b = bindings(&[("tag", "v1")]);
        match render("push ${tag} ${remote}", &b) {
            Err(ReleaseError::UndefinedVariable { name, .. }) => assert_eq!(name, "remote"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_render_leaves_plain_dollar_alone() {
        let b = bindings(&[("x", "1")]);
        assert_eq!(render("echo $HOME ${x}", &b).unwrap(), "echo $HOME 1");
    }
}
