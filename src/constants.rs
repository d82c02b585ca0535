/// Current semver version of the package.
pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Release version injected at build time, e.g. a tag.
pub(crate) const GIT_VERSION: &str = env!("GIT_VERSION");

/// GIT revision injected at build time.
pub(crate) const GIT_REVISION: &str = env!("GIT_REVISION");

/// Version string combining [`GIT_VERSION`] and [`GIT_REVISION`].
pub(crate) const VERSION_STRING: &str =
    concat!(env!("GIT_VERSION"), ", revision ", env!("GIT_REVISION"));
