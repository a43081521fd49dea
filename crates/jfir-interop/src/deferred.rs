//! Deferred, memoized computations on synthesized declarations.
//!
//! Annotations, annotation defaults and constant initializers may refer to
//! classes that are not synthesized yet, including the declaring class
//! itself. They are therefore stored as a callable and evaluated on first
//! access, once per declaration.

use crate::session::InteropSession;
use std::fmt;
use std::sync::OnceLock;

type Compute<T> = Box<dyn Fn(&InteropSession) -> T + Send + Sync>;

pub struct Deferred<T> {
    value: OnceLock<T>,
    compute: Compute<T>,
}

impl<T> Deferred<T> {
    pub fn new(compute: impl Fn(&InteropSession) -> T + Send + Sync + 'static) -> Self {
        Self {
            value: OnceLock::new(),
            compute: Box::new(compute),
        }
    }

    /// Evaluates on first access. Concurrent first accesses block until the
    /// single evaluation finishes.
    pub fn get(&self, session: &InteropSession) -> &T {
        self.value.get_or_init(|| (self.compute)(session))
    }

    pub fn is_computed(&self) -> bool {
        self.value.get().is_some()
    }
}

impl<T: Clone + Send + Sync + 'static> Deferred<T> {
    /// A value that needs no computation.
    pub fn ready(value: T) -> Self {
        Self::new(move |_| value.clone())
    }
}

impl<T: Default + Clone + Send + Sync + 'static> Default for Deferred<T> {
    fn default() -> Self {
        Self::ready(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => f.debug_tuple("Deferred").field(value).finish(),
            None => f.write_str("Deferred(<pending>)"),
        }
    }
}
