use std::thread;

#[inline]
pub fn id() -> usize {
    __get_id()
}

#[cfg(unix)]
#[inline]
fn __get_id() -> usize {
    unsafe {
        libc::pthread_self() as usize
    }
}

#[cfg(not(all(unix)))]
#[inline]
fn __get_id() -> usize {
    0
}

/// Returns the current thread name.
///
/// Unnamed threads are identified by their OS thread id, like `thread-0x7f2c5e1fd700`.
pub fn name() -> String {
    match thread::current().name() {
        Some(name) => name.to_owned(),
        None => format!("thread-{:#x}", id()),
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::{id, name};

    #[test]
    fn named() {
        let name = thread::Builder::new()
            .name("worker-1".into())
            .spawn(name)
            .unwrap()
            .join()
            .unwrap();

        assert_eq!("worker-1", name);
    }

    #[cfg(unix)]
    #[test]
    fn unnamed_falls_back_to_id() {
        let (name, id) = thread::spawn(|| (name(), id())).join().unwrap();

        assert_eq!(format!("thread-{:#x}", id), name);
    }
}
