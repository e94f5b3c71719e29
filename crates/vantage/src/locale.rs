//! Locale-specific template lookup with fallback.
//!
//! A localized template lives in a directory named after its locale,
//! alongside the source-language file: `views/faq.jinja` has its German
//! variant at `views/de-DE/faq.jinja`. Lookup falls back through locale
//! generality — `de-DE` is tried before `de` — and degrades to the
//! original path when no variant directory holds the file.
//!
//! The algorithm is pure given a [`FileProbe`]; all I/O goes through that
//! seam, so the fallback order is testable without touching a disk.

use std::path::{Path, PathBuf};

use tracing::debug;

/// File-existence probe used by locale fallback.
///
/// [`DiskProbe`] is the real-filesystem implementation; tests substitute
/// in-memory probes to pin down fallback order without fixtures.
pub trait FileProbe {
    /// Returns true if a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskProbe;

impl FileProbe for DiskProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Returns fallback candidates for a locale, most specific first.
///
/// Candidates are produced by progressively dropping trailing `-`
/// separated subtags: `"zh-Hant-TW"` yields `["zh-Hant-TW", "zh-Hant",
/// "zh"]`; a bare language like `"de"` yields just `["de"]`.
pub fn fallback_chain(locale: &str) -> Vec<&str> {
    let mut candidates = Vec::new();
    let mut current = locale;
    loop {
        candidates.push(current);
        match current.rfind('-') {
            Some(split) => current = &current[..split],
            None => break,
        }
    }
    candidates
}

/// Computes the locale-specific variant of `path`.
///
/// Returns `path` unchanged (without probing) when `locale` equals
/// `source_locale`. Otherwise each fallback candidate directory is tried
/// in order, and the first existing variant wins; when none exists the
/// original path is returned — both-absent is not an error.
pub fn localize(path: &Path, locale: &str, source_locale: &str, probe: &dyn FileProbe) -> PathBuf {
    if locale == source_locale {
        return path.to_path_buf();
    }

    let (dir, file) = match (path.parent(), path.file_name()) {
        (Some(dir), Some(file)) => (dir, file),
        _ => return path.to_path_buf(),
    };

    for candidate in fallback_chain(locale) {
        let localized = dir.join(candidate).join(file);
        if probe.exists(&localized) {
            debug!(
                file = %localized.display(),
                locale = candidate,
                "using localized template variant"
            );
            return localized;
        }
    }

    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Probe over a fixed set of paths.
    struct StaticProbe {
        files: HashSet<PathBuf>,
    }

    impl StaticProbe {
        fn new<const N: usize>(files: [&str; N]) -> Self {
            Self {
                files: files.iter().map(PathBuf::from).collect(),
            }
        }
    }

    impl FileProbe for StaticProbe {
        fn exists(&self, path: &Path) -> bool {
            self.files.contains(path)
        }
    }

    /// Probe that fails the test when consulted.
    struct NoIoProbe;

    impl FileProbe for NoIoProbe {
        fn exists(&self, _path: &Path) -> bool {
            panic!("locale fallback probed the filesystem for identical locales");
        }
    }

    #[test]
    fn test_fallback_chain_most_specific_first() {
        assert_eq!(fallback_chain("de-DE"), vec!["de-DE", "de"]);
        assert_eq!(fallback_chain("zh-Hant-TW"), vec!["zh-Hant-TW", "zh-Hant", "zh"]);
        assert_eq!(fallback_chain("de"), vec!["de"]);
    }

    #[test]
    fn test_identical_locales_skip_probing() {
        let path = Path::new("/views/faq.jinja");
        let localized = localize(path, "en-US", "en-US", &NoIoProbe);

        assert_eq!(localized, path);
    }

    #[test]
    fn test_exact_locale_directory_wins() {
        let probe = StaticProbe::new([
            "/views/de-DE/faq.jinja",
            "/views/de/faq.jinja",
        ]);

        let localized = localize(Path::new("/views/faq.jinja"), "de-DE", "en-US", &probe);
        assert_eq!(localized, Path::new("/views/de-DE/faq.jinja"));
    }

    #[test]
    fn test_falls_back_to_language_directory() {
        let probe = StaticProbe::new(["/views/de/faq.jinja"]);

        let localized = localize(Path::new("/views/faq.jinja"), "de-DE", "en-US", &probe);
        assert_eq!(localized, Path::new("/views/de/faq.jinja"));
    }

    #[test]
    fn test_no_variant_returns_original() {
        let probe = StaticProbe::new([]);
        let path = Path::new("/views/faq.jinja");

        assert_eq!(localize(path, "de-DE", "en-US", &probe), path);
    }

    proptest! {
        #[test]
        fn prop_identical_locales_are_identity(
            segments in prop::collection::vec("[a-z]{1,8}", 1..4),
            locale in "[a-z]{2}(-[A-Z]{2})?",
        ) {
            let path: PathBuf = segments.iter().collect();
            prop_assert_eq!(localize(&path, &locale, &locale, &NoIoProbe), path);
        }
    }

    #[test]
    fn test_variant_directory_inserted_before_file() {
        let probe = StaticProbe::new(["/views/pages/fr/about.jinja"]);

        let localized = localize(
            Path::new("/views/pages/about.jinja"),
            "fr-FR",
            "en-US",
            &probe,
        );
        assert_eq!(localized, Path::new("/views/pages/fr/about.jinja"));
    }
}
