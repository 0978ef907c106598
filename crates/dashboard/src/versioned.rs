// -------------------------------------------------------------------
// Versioned
// -------------------------------------------------------------------

/// Wraps a value with a counter that bumps on every mutable access, so
/// derived computations can tell whether their input changed.
#[derive(Clone)]
pub struct Versioned<T> {
    version: u64,
    data: T,
}

impl<T> Versioned<T> {
    pub fn new(data: T) -> Self {
        Self { version: 0, data }
    }

    pub fn get(&self) -> &T {
        &self.data
    }

    pub fn set(&mut self, data: T) {
        self.data = data;
        self.version = self.version.wrapping_add(1);
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

// -------------------------------------------------------------------
// Memoized
// -------------------------------------------------------------------

/// A derived value recomputed from `S` exactly when its key changes.
///
/// The key function must be cheap (typically a version read); the calc
/// function is the single path to the value, so the cached copy can
/// never drift from its source.
pub struct Memoized<S, K, V> {
    last_key: Option<K>,
    last_value: Option<V>,
    get_key: Box<dyn Fn(&S) -> K>,
    calc: Box<dyn Fn(&S) -> V>,
}

impl<S, K, V> Memoized<S, K, V>
where
    K: PartialEq,
{
    pub fn new(
        get_key: impl Fn(&S) -> K + 'static,
        calc: impl Fn(&S) -> V + 'static,
    ) -> Self {
        Self {
            last_key: None,
            last_value: None,
            get_key: Box::new(get_key),
            calc: Box::new(calc),
        }
    }

    fn ensure_fresh(&mut self, source: &S) {
        let key = (self.get_key)(source);
        let stale = self.last_key.as_ref() != Some(&key);
        if stale {
            self.last_value = Some((self.calc)(source));
            self.last_key = Some(key);
        }
    }

    pub fn get<'a>(&'a mut self, source: &S) -> &'a V {
        self.ensure_fresh(source);
        self.last_value.as_ref().unwrap()
    }

    /// Mutable access without recomputation, for consumers that adjust
    /// the cached value in place (e.g. node positions moved by the
    /// graph widget) between rebuilds.
    pub fn get_mut<'a>(&'a mut self, source: &S) -> &'a mut V {
        self.ensure_fresh(source);
        self.last_value.as_mut().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn versioned_bumps_on_set_only() {
        let mut v = Versioned::new(1);
        assert_eq!(v.version(), 0);
        assert_eq!(*v.get(), 1);
        assert_eq!(v.version(), 0);
        v.set(2);
        assert_eq!(v.version(), 1);
        assert_eq!(*v.get(), 2);
    }

    #[test]
    fn memoized_recomputes_only_when_key_changes() {
        let calls = Rc::new(Cell::new(0));
        let calls_in_calc = Rc::clone(&calls);
        let mut doubled: Memoized<Versioned<i32>, u64, i32> =
            Memoized::new(
                |s: &Versioned<i32>| s.version(),
                move |s| {
                    calls_in_calc.set(calls_in_calc.get() + 1);
                    s.get() * 2
                },
            );

        let mut source = Versioned::new(3);
        assert_eq!(*doubled.get(&source), 6);
        assert_eq!(*doubled.get(&source), 6);
        assert_eq!(calls.get(), 1);

        source.set(5);
        assert_eq!(*doubled.get(&source), 10);
        assert_eq!(calls.get(), 2);
    }
}
