//! Fetch expressions handed to `kpt pkg get`.
//!
//! An expression has the form `<repo>.git/<directory>@<commit>`, for example
//! `https://github.com/jenkins-x/jxr-versions.git/charts/jetstack@v1.2.3`.

use std::fmt;

use crate::manifest::UpstreamReference;

/// Suffix every repository URL in an expression ends with.
pub const ARCHIVE_SUFFIX: &str = ".git";

/// Separator between the repository URL and the package directory.
pub const DIRECTORY_SEPARATOR: char = '/';

/// A canonical `<url><directory>@<commit>` fetch argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchExpression(String);

impl FetchExpression {
    /// Canonicalize an upstream reference into a fetch expression.
    pub fn new(upstream: &UpstreamReference) -> Self {
        Self(format!(
            "{}{}@{}",
            normalize_repo_url(&upstream.repo),
            normalize_directory(&upstream.directory),
            upstream.commit
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FetchExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FetchExpression {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Append [`ARCHIVE_SUFFIX`] unless the URL already ends with it.
pub fn normalize_repo_url(url: &str) -> String {
    if url.ends_with(ARCHIVE_SUFFIX) {
        url.to_string()
    } else {
        format!(
            "{}{}",
            url.trim_end_matches(DIRECTORY_SEPARATOR),
            ARCHIVE_SUFFIX
        )
    }
}

/// Prepend [`DIRECTORY_SEPARATOR`] unless the directory already starts with it.
pub fn normalize_directory(directory: &str) -> String {
    if directory.starts_with(DIRECTORY_SEPARATOR) {
        directory.to_string()
    } else {
        format!("{}{}", DIRECTORY_SEPARATOR, directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(repo: &str, directory: &str, commit: &str) -> UpstreamReference {
        UpstreamReference {
            repo: repo.to_string(),
            directory: directory.to_string(),
            commit: commit.to_string(),
        }
    }

    #[test]
    fn test_expression_appends_suffix_and_keeps_absolute_dir() {
        let expr = FetchExpression::new(&upstream("https://example.com/repo", "/pkg", "v1.2.3"));
        assert_eq!(expr.as_str(), "https://example.com/repo.git/pkg@v1.2.3");
    }

    #[test]
    fn test_expression_already_canonical() {
        let expr = FetchExpression::new(&upstream(
            "https://github.com/jenkins-x/jxr-versions.git",
            "/charts/jetstack/cert-manager",
            "9a5e1d4",
        ));
        assert_eq!(
            expr.to_string(),
            "https://github.com/jenkins-x/jxr-versions.git/charts/jetstack/cert-manager@9a5e1d4"
        );
    }

    #[test]
    fn test_expression_prefixes_relative_dir() {
        let expr = FetchExpression::new(&upstream("https://example.com/repo.git", "pkg/a", "main"));
        assert_eq!(expr.as_str(), "https://example.com/repo.git/pkg/a@main");
    }

    #[test]
    fn test_trailing_slash_stripped_before_suffix() {
        assert_eq!(
            normalize_repo_url("https://example.com/repo/"),
            "https://example.com/repo.git"
        );
        assert_eq!(
            normalize_repo_url("git@github.com:org/repo"),
            "git@github.com:org/repo.git"
        );
    }

    #[test]
    fn test_normalize_directory() {
        assert_eq!(normalize_directory("/"), "/");
        assert_eq!(normalize_directory("a"), "/a");
        assert_eq!(normalize_directory("/a/b"), "/a/b");
    }
}
