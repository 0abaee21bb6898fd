//! Property-based tests for fetch expressions and manifest discovery.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::expression::{normalize_directory, normalize_repo_url, FetchExpression};
    use crate::manifest::UpstreamReference;
    use proptest::prelude::*;

    // ============================================================================
    // FetchExpression property tests
    // ============================================================================

    proptest! {
        /// Property: the expression is exactly normalize(url) + normalize(dir) + "@" + commit
        #[test]
        fn expression_is_concatenation_of_normalized_parts(
            repo in "https://[a-z]{1,8}\\.com/[a-z/]{0,12}(\\.git)?",
            directory in "/?[a-z0-9/]{1,12}",
            commit in "[a-f0-9]{7,40}",
        ) {
            let upstream = UpstreamReference {
                repo: repo.clone(),
                directory: directory.clone(),
                commit: commit.clone(),
            };
            let expected = format!(
                "{}{}@{}",
                normalize_repo_url(&repo),
                normalize_directory(&directory),
                commit
            );
            prop_assert_eq!(FetchExpression::new(&upstream).to_string(), expected);
        }

        /// Property: normalized URLs always end with .git and are unchanged if they already did
        #[test]
        fn normalized_url_ends_with_suffix(url in "[a-zA-Z0-9:/._-]{1,30}") {
            let normalized = normalize_repo_url(&url);
            prop_assert!(normalized.ends_with(".git"));
            if url.ends_with(".git") {
                prop_assert_eq!(normalized, url);
            }
        }

        /// Property: URL normalization is idempotent
        #[test]
        fn normalize_url_is_idempotent(url in "[a-zA-Z0-9:/._-]{1,30}") {
            let once = normalize_repo_url(&url);
            prop_assert_eq!(normalize_repo_url(&once), once.clone());
        }

        /// Property: normalized directories start with exactly the original plus at most one '/'
        #[test]
        fn normalized_directory_is_absolute(directory in "[a-z0-9/._-]{1,20}") {
            let normalized = normalize_directory(&directory);
            prop_assert!(normalized.starts_with('/'));
            prop_assert!(normalized.ends_with(&directory));
            prop_assert!(normalized.len() - directory.len() <= 1);
        }
    }

    // ============================================================================
    // discovery property tests
    // ============================================================================

    // Case-insensitive filesystems would merge `kptfile` and `Kptfile`.
    #[cfg(target_os = "linux")]
    mod discovery {
        use crate::discovery::{walk, MANIFEST_FILE_NAME};
        use proptest::prelude::*;
        use std::collections::BTreeSet;
        use std::fs;
        use std::path::PathBuf;

        fn file_names() -> impl Strategy<Value = &'static str> {
            prop_oneof![
                Just(MANIFEST_FILE_NAME),
                Just("kptfile"),
                Just("KPTFILE"),
                Just("Kptfile.yaml"),
                Just("values.yaml"),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            /// Property: discovery finds exactly the files named Kptfile, at any depth
            #[test]
            fn discovery_matches_exact_name_at_any_depth(
                files in prop::collection::vec(
                    (prop::collection::vec("[a-d]", 0..4), file_names()),
                    0..12,
                )
            ) {
                let temp = tempfile::TempDir::new().unwrap();
                let mut expected = BTreeSet::new();
                for (dirs, name) in &files {
                    let dir: PathBuf = dirs.iter().collect();
                    let path = temp.path().join(&dir).join(name);
                    fs::create_dir_all(path.parent().unwrap()).unwrap();
                    fs::write(&path, "").unwrap();
                    if *name == MANIFEST_FILE_NAME {
                        expected.insert(path);
                    }
                }

                let found: BTreeSet<PathBuf> = walk(temp.path())
                    .map(|loc| loc.unwrap().file_path)
                    .collect();
                prop_assert_eq!(found, expected);
            }
        }
    }
}
