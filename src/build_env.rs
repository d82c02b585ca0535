//! Resolution of build-injected values, shared with the build script.
use std::ffi::OsString;

/// Pick the value for the build variable `name`.
///
/// A value set in the build environment wins and is kept verbatim, even when
/// empty or blank. Only a single trailing newline is stripped since
/// `cargo:rustc-env` is line based. Unset variables fall back to `derive`.
pub(crate) fn resolve(
    name: &str,
    env: Option<OsString>,
    derive: impl FnOnce() -> String,
) -> Result<String, String> {
    let Some(value) = env else {
        return Ok(derive());
    };

    let value = value
        .into_string()
        .map_err(|v| format!("{name} is not valid UTF-8: {v:?}"))?;
    let value = value
        .strip_suffix("\r\n")
        .or_else(|| value.strip_suffix('\n'))
        .unwrap_or(&value);

    if value.contains(['\n', '\r']) {
        return Err(format!("{name} must not contain line breaks: {value:?}"));
    }
    Ok(value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derived() -> String {
        "v0.1.0".to_owned()
    }

    fn set(value: &str) -> Option<OsString> {
        Some(OsString::from(value))
    }

    #[test]
    fn test_unset_uses_derived() {
        assert_eq!(resolve("GIT_VERSION", None, derived).unwrap(), "v0.1.0");
    }

    #[test]
    fn test_empty_is_kept() {
        assert_eq!(resolve("GIT_VERSION", set(""), derived).unwrap(), "");
    }

    #[test]
    fn test_blank_is_kept() {
        assert_eq!(resolve("GIT_VERSION", set(" "), derived).unwrap(), " ");
        assert_eq!(resolve("GIT_REVISION", set(" abc "), derived).unwrap(), " abc ");
    }

    #[test]
    fn test_derive_not_called_when_set() {
        let value = resolve("GIT_REVISION", set("abcdef0"), || {
            panic!("derive must not run for a set variable")
        });
        assert_eq!(value.unwrap(), "abcdef0");
    }

    #[test]
    fn test_single_trailing_newline_stripped() {
        assert_eq!(resolve("GIT_VERSION", set("v1.2.3\n"), derived).unwrap(), "v1.2.3");
        assert_eq!(resolve("GIT_VERSION", set("v1.2.3\r\n"), derived).unwrap(), "v1.2.3");
        assert_eq!(resolve("GIT_VERSION", set("\n"), derived).unwrap(), "");
    }

    #[test]
    fn test_line_breaks_rejected() {
        let err = resolve("GIT_REVISION", set("abc\ndef"), derived).unwrap_err();
        assert!(err.starts_with("GIT_REVISION must not contain line breaks"), "{err}");

        let err = resolve("GIT_VERSION", set("v1\n\n"), derived).unwrap_err();
        assert!(err.starts_with("GIT_VERSION"), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_rejected() {
        use std::os::unix::ffi::OsStringExt;

        let value = OsString::from_vec(vec![b'v', 0xff]);
        let err = resolve("GIT_VERSION", Some(value), derived).unwrap_err();
        assert!(err.starts_with("GIT_VERSION is not valid UTF-8"), "{err}");
    }
}
