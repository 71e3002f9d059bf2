//! Per-thread diagnostic contexts.
//!
//! Both contexts live in thread-local storage, so each thread sees only what it pushed or put
//! itself. Loggers take snapshots at logging time; records never borrow the live contexts.

/// Nested diagnostic context: a per-thread stack of strings.
pub mod ndc {
    use std::cell::RefCell;

    thread_local! {
        static STACK: RefCell<Vec<String>> = RefCell::new(Vec::new());
    }

    pub fn push<S: Into<String>>(value: S) {
        STACK.with(|stack| stack.borrow_mut().push(value.into()));
    }

    pub fn pop() -> Option<String> {
        STACK.with(|stack| stack.borrow_mut().pop())
    }

    pub fn peek() -> Option<String> {
        STACK.with(|stack| stack.borrow().last().cloned())
    }

    pub fn depth() -> usize {
        STACK.with(|stack| stack.borrow().len())
    }

    pub fn clear() {
        STACK.with(|stack| stack.borrow_mut().clear());
    }

    /// Returns a copy of the current stack in push order.
    pub fn snapshot() -> Vec<String> {
        STACK.with(|stack| stack.borrow().clone())
    }
}

/// Mapped diagnostic context: a per-thread string map preserving insertion order.
pub mod mdc {
    use std::cell::RefCell;

    thread_local! {
        static MAP: RefCell<Vec<(String, String)>> = RefCell::new(Vec::new());
    }

    /// Puts the value under the given key.
    ///
    /// Replacing an existing key keeps its original position.
    pub fn put<K, V>(key: K, value: V)
        where K: Into<String>,
              V: ToString
    {
        let key = key.into();
        let value = value.to_string();

        MAP.with(|map| {
            let mut map = map.borrow_mut();
            match map.iter_mut().find(|entry| entry.0 == key) {
                Some(entry) => entry.1 = value,
                None => map.push((key, value)),
            }
        });
    }

    pub fn get(key: &str) -> Option<String> {
        MAP.with(|map| {
            map.borrow().iter().find(|entry| entry.0 == key).map(|entry| entry.1.clone())
        })
    }

    pub fn remove(key: &str) -> Option<String> {
        MAP.with(|map| {
            let mut map = map.borrow_mut();
            let pos = map.iter().position(|entry| entry.0 == key)?;
            Some(map.remove(pos).1)
        })
    }

    pub fn clear() {
        MAP.with(|map| map.borrow_mut().clear());
    }

    /// Returns a copy of the current map in insertion order.
    pub fn snapshot() -> Vec<(String, String)> {
        MAP.with(|map| map.borrow().clone())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::{mdc, ndc};

    #[test]
    fn ndc_stack() {
        ndc::push("ndc_1");
        ndc::push("ndc_2");

        assert_eq!(2, ndc::depth());
        assert_eq!(Some("ndc_2".to_owned()), ndc::peek());
        assert_eq!(vec!["ndc_1", "ndc_2"], ndc::snapshot());
        assert_eq!(Some("ndc_2".to_owned()), ndc::pop());

        ndc::clear();
        assert_eq!(0, ndc::depth());
        assert_eq!(None, ndc::pop());
    }

    #[test]
    fn mdc_preserves_insertion_order() {
        mdc::put("b", "1");
        mdc::put("a", 2);
        mdc::put("b", "3");

        assert_eq!(vec![("b".to_owned(), "3".to_owned()), ("a".to_owned(), "2".to_owned())],
            mdc::snapshot());
        assert_eq!(Some("2".to_owned()), mdc::get("a"));
        assert_eq!(Some("3".to_owned()), mdc::remove("b"));
        assert_eq!(None, mdc::remove("b"));

        mdc::clear();
        assert!(mdc::snapshot().is_empty());
    }

    #[test]
    fn contexts_are_thread_local() {
        ndc::push("main");
        mdc::put("key", "main");

        thread::spawn(|| {
            assert!(ndc::snapshot().is_empty());
            assert!(mdc::snapshot().is_empty());
        }).join().unwrap();

        ndc::clear();
        mdc::clear();
    }
}
