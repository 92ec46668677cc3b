//! Live feed subscription handle

use std::fmt;

/// Owned handle to a live feed subscription
///
/// Releasing stops future deliveries. Release is idempotent and also runs
/// on drop, so a handle can never outlive its owner.
pub struct Subscription {
    device_id: String,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Create a handle that runs `cancel` once on release
    pub fn new(device_id: impl Into<String>, cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            device_id: device_id.into(),
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Device this subscription delivers readings for
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Stop future deliveries
    pub fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            log::debug!("Releasing subscription for {}", self.device_id);
            cancel();
        }
    }

    /// Check if the subscription has been released
    pub fn is_released(&self) -> bool {
        self.cancel.is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("device_id", &self.device_id)
            .field("released", &self.is_released())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_subscription() -> (Subscription, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sub = Subscription::new("AA:BB:CC:DD:EE:01", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (sub, calls)
    }

    #[test]
    fn test_release_is_idempotent() {
        let (mut sub, calls) = counting_subscription();
        assert!(!sub.is_released());

        sub.release();
        sub.release();

        assert!(sub.is_released());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_releases() {
        let (sub, calls) = counting_subscription();
        drop(sub);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_after_release_does_not_cancel_twice() {
        let (mut sub, calls) = counting_subscription();
        sub.release();
        drop(sub);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
