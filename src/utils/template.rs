//! Literal string substitution utilities.
//!
//! Template customization here works on full literal strings (the template
//! files carry complete placeholder values like `name = "Your Name"`), not
//! `{{key}}` markers.

/// Apply literal `(from, to)` replacement pairs in order.
pub fn replace_pairs(content: &str, pairs: &[(String, String)]) -> String {
    let mut result = content.to_string();

    for (from, to) in pairs {
        result = result.replace(from.as_str(), to.as_str());
    }

    result
}

/// Whether any of the replacement sources is present in the content.
pub fn any_present(content: &str, pairs: &[(String, String)]) -> bool {
    pairs.iter().any(|(from, _)| content.contains(from.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn replaces_each_pair() {
        let p = pairs(&[("alpha", "one"), ("beta", "two")]);
        assert_eq!(replace_pairs("alpha and beta", &p), "one and two");
    }

    #[test]
    fn untouched_when_nothing_matches() {
        let p = pairs(&[("alpha", "one")]);
        assert_eq!(replace_pairs("gamma", &p), "gamma");
        assert!(!any_present("gamma", &p));
    }

    #[test]
    fn pairs_apply_in_order() {
        let p = pairs(&[("aa", "b"), ("bb", "c")]);
        assert_eq!(replace_pairs("aaaa", &p), "c");
    }
}
