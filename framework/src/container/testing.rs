use super::{Container, TEST_CONTAINER};
use std::any::Any;

/// Thread-local container used in tests
///
/// ```rust,ignore
/// let _guard = TestContainer::fake();
/// TestContainer::singleton(TaskService::new(repository));
/// // App::resolve::<TaskService>() now returns the faked instance
/// ```
pub struct TestContainer;

impl TestContainer {
    /// Install an empty test container for the current thread
    ///
    /// It is removed when the returned guard drops.
    pub fn fake() -> TestContainerGuard {
        TEST_CONTAINER.with(|c| *c.borrow_mut() = Some(Container::new()));
        TestContainerGuard { _private: () }
    }

    pub fn singleton<T: Any + Send + Sync + 'static>(instance: T) {
        TEST_CONTAINER.with(|c| {
            if let Some(container) = c.borrow_mut().as_mut() {
                container.singleton(instance);
            }
        });
    }
}

/// Clears the thread's test container on drop
pub struct TestContainerGuard {
    _private: (),
}

impl Drop for TestContainerGuard {
    fn drop(&mut self) {
        TEST_CONTAINER.with(|c| *c.borrow_mut() = None);
    }
}
