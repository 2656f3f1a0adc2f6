//! Starter files written by `sitesnap init`.
//!
//! Both templates are real TOML (so tests can parse them) and are handed out with every
//! setting commented, leaving a fresh config inert until edited.

/// Starter for a site directory.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Starter for `~/.sitesnap.toml`.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// The site-directory starter, settings commented.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// The home-directory starter, settings commented.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Prefixes every setting line with `# `; comments and blank lines pass through.
fn comment_template(template: &str) -> String {
    template
        .lines()
        .map(|line| match line {
            "" => String::from("\n"),
            l if l.starts_with('#') => format!("{l}\n"),
            l => format!("# {l}\n"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    #[test]
    fn local_template_parses_as_valid_toml() {
        let result = parse_config(LOCAL_TEMPLATE);
        assert!(result.is_ok(), "local template failed to parse: {result:?}");
    }

    #[test]
    fn global_template_parses_as_valid_toml() {
        let result = parse_config(GLOBAL_TEMPLATE);
        assert!(result.is_ok(), "global template failed to parse: {result:?}");
    }

    #[test]
    fn commented_template_parses_as_empty_config() {
        let config = parse_config(&local_template()).unwrap();
        assert!(config.cms.is_none());
        assert!(config.listing.is_none());
    }

    #[test]
    fn comment_template_preserves_comments_and_blank_lines() {
        let input = "# heading\n[section]\n\nkey = \"value\"\n";
        assert_eq!(
            comment_template(input),
            "# heading\n# [section]\n\n# key = \"value\"\n"
        );
    }
}
