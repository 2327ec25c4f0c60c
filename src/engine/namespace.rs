use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use handlebars::Handlebars;

use crate::traits::FileSystem;

/// How interpolated values are escaped on output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Escape {
    None,
    Html,
}

/// State shared by every template handle created from the same root:
/// the registry of named bodies and functions, plus where files come from.
///
/// The registry is copy-on-write so executions render from a snapshot
/// without holding the namespace lock.
#[derive(Clone)]
pub(crate) struct Namespace {
    pub(crate) registry: Arc<Handlebars<'static>>,
    pub(crate) fs: Arc<dyn FileSystem>,
}

impl Namespace {
    pub(crate) fn new(escape: Escape, fs: Arc<dyn FileSystem>) -> Self {
        let mut registry = Handlebars::new();
        match escape {
            Escape::None => registry.register_escape_fn(handlebars::no_escape),
            Escape::Html => registry.register_escape_fn(handlebars::html_escape),
        }

        Self {
            registry: Arc::new(registry),
            fs,
        }
    }

    /// The registry for mutation; copied first if an execution still holds it
    pub(crate) fn registry_mut(&mut self) -> &mut Handlebars<'static> {
        Arc::make_mut(&mut self.registry)
    }
}

/// Handle to a namespace. Lock poisoning is ignored: a panic inside a helper
/// must not make every other handle unusable.
#[derive(Clone)]
pub(crate) struct Shared(Arc<RwLock<Namespace>>);

impl Shared {
    pub(crate) fn new(namespace: Namespace) -> Self {
        Self(Arc::new(RwLock::new(namespace)))
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Namespace> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Namespace> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deep copy into an independent namespace
    pub(crate) fn fork(&self) -> Self {
        Self::new(self.read().clone())
    }

    /// The registry as it is now, for rendering outside the lock
    pub(crate) fn registry(&self) -> Arc<Handlebars<'static>> {
        Arc::clone(&self.read().registry)
    }

    pub(crate) fn fs(&self) -> Arc<dyn FileSystem> {
        Arc::clone(&self.read().fs)
    }

    pub(crate) fn same_as(&self, other: &Shared) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
