//! Make-style variable expansion against host variables.
//!
//! Supports `$(name)`, `${name}`, `$$` and the suffix substitution form
//! `$(name:from=to)`. Unknown names, and names that refer back to themselves,
//! are left as written.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::{Captures, Regex};

static VAR_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\$|\$\(([^()]+)\)|\$\{([^{}]+)\}").expect("valid variable regex")
});

/// Expand variable references in `value`.
pub fn expand(value: &str, vars: &BTreeMap<String, String>) -> String {
    expand_inner(value, vars, &mut BTreeSet::new())
}

fn expand_inner(value: &str, vars: &BTreeMap<String, String>, active: &mut BTreeSet<String>) -> String {
    VAR_REF
        .replace_all(value, |caps: &Captures<'_>| {
            let Some(reference) = caps.get(1).or_else(|| caps.get(2)) else {
                return "$".to_string();
            };

            let (name, substitution) = split_substitution(reference.as_str());

            let Some(raw) = vars.get(name) else {
                return caps[0].to_string();
            };
            if active.contains(name) {
                return caps[0].to_string();
            }

            active.insert(name.to_string());
            let expanded = expand_inner(raw, vars, active);
            active.remove(name);

            match substitution {
                Some((from, to)) => substitute_suffix(&expanded, from, to),
                None => expanded,
            }
        })
        .into_owned()
}

/// Split `name:from=to` into the name and the optional suffix substitution.
fn split_substitution(reference: &str) -> (&str, Option<(&str, &str)>) {
    match reference.split_once(':') {
        Some((name, rule)) => match rule.split_once('=') {
            Some((from, to)) => (name, Some((from, to))),
            None => (name, None),
        },
        None => (reference, None),
    }
}

/// Replace `from` with `to` at the end of every whitespace separated word.
fn substitute_suffix(value: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return value.to_string();
    }

    value
        .split(' ')
        .map(|word| match word.strip_suffix(from) {
            Some(stem) => format!("{}{}", stem, to),
            None => word.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_expand_nested() {
        let v = vars(&[("a", "$(b)/x"), ("b", "${c}"), ("c", "/root")]);
        assert_eq!(expand("$(a)", &v), "/root/x");
    }

    #[test]
    fn test_unknown_left_alone() {
        let v = vars(&[]);
        assert_eq!(expand("$(srcdir)/ext", &v), "$(srcdir)/ext");
    }

    #[test]
    fn test_dollar_escape() {
        let v = vars(&[("x", "1")]);
        assert_eq!(expand("$$HOME $(x)", &v), "$HOME 1");
    }

    #[test]
    fn test_self_reference_does_not_loop() {
        let v = vars(&[("a", "$(a)!")]);
        assert_eq!(expand("$(a)", &v), "$(a)!");
    }

    #[test]
    fn test_suffix_substitution() {
        let v = vars(&[("objs", "a.o b.o")]);
        assert_eq!(expand("$(objs:.o=.c)", &v), "a.c b.c");
    }
}
