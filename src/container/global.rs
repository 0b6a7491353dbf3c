//! The process-wide default container.
//!
//! Nothing in this crate reads the default implicitly: every API takes its
//! container as a parameter. This module only offers a place to keep one
//! shared container for programs that want it, guarded so it can be set
//! at most once.
//!
//! # Examples
//!
//! ```rust
//! use funbox::container::{Container, global};
//! use funbox::Error;
//!
//! global::configure(Container::new()).unwrap();
//! assert_eq!(
//!     global::configure(Container::new()),
//!     Err(Error::GlobalAlreadyConfigured)
//! );
//! ```

use std::sync::OnceLock;

use super::config::Config;
use super::define::Define;
use super::mixin::Import;
use super::{Alias, Container};
use crate::error::{Error, Result};

static GLOBAL: OnceLock<Container> = OnceLock::new();

/// Installs `container` as the process-wide default.
///
/// # Errors
///
/// Returns [`Error::GlobalAlreadyConfigured`] when a default is already
/// installed, including one created lazily by [`container`].
pub fn configure(container: Container) -> Result<()> {
    GLOBAL
        .set(container)
        .map_err(|_| Error::GlobalAlreadyConfigured)?;
    tracing::debug!("global container configured");
    Ok(())
}

/// Returns `true` once a default container exists.
pub fn is_configured() -> bool {
    GLOBAL.get().is_some()
}

/// Returns the default container, creating one from
/// [`Config::from_env`] if none was configured.
pub fn container() -> Container {
    GLOBAL
        .get_or_init(|| {
            tracing::debug!("creating default global container");
            Container::with_config(Config::from_env())
        })
        .clone()
}

/// Runs `block` against a root builder of the default container, marking
/// the calling file as loaded like [`define`](super::define()).
///
/// # Errors
///
/// Returns whatever `block` returns.
#[track_caller]
pub fn define<F>(block: F) -> Result<()>
where
    F: FnOnce(&Define) -> Result<()>,
{
    super::define(&container(), block)
}

/// Creates an [`Import`] over the default container.
pub fn import<I, A>(aliases: I) -> Import
where
    I: IntoIterator<Item = A>,
    A: Into<Alias>,
{
    container().import(aliases)
}
