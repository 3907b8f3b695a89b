//! Host environment that owns off-screen containers.
//!
//! Every export stage lives inside a [`TemporaryContainer`] attached to a
//! [`Host`]. The container is an RAII guard: dropping it detaches it from the
//! host, so a stage can never leave a container behind, whichever way the
//! export that created it ends.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use log::trace;

use crate::geometry::{Bounds, Point, Size};

/// Position far outside any viewport, where containers never become visible
/// and never take part in the host's layout.
pub const OFFSCREEN_ORIGIN: Point = Point::new(-10_000.0, -10_000.0);

/// Identifier of a container attached to a [`Host`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContainerId(u64);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container-{}", self.0)
    }
}

/// Registry of the containers currently attached to the host document.
///
/// `Host` is `Sync`; independent exports may attach containers concurrently.
#[derive(Debug, Default)]
pub struct Host {
    next_id: AtomicU64,
    attached: Mutex<BTreeMap<ContainerId, Bounds>>,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a new off-screen container of the given size.
    pub fn attach_offscreen(&self, size: Size) -> TemporaryContainer<'_> {
        let id = ContainerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let bounds = Bounds::new_from_top_left(OFFSCREEN_ORIGIN, size);
        self.registry().insert(id, bounds);
        trace!(container:% = id; "Attached off-screen container");
        TemporaryContainer { host: self, id }
    }

    /// Returns the number of containers currently attached.
    pub fn attached_count(&self) -> usize {
        self.registry().len()
    }

    /// Returns `true` if the container is still attached.
    pub fn is_attached(&self, id: ContainerId) -> bool {
        self.registry().contains_key(&id)
    }

    /// Returns where the container sits in host coordinates.
    pub fn container_bounds(&self, id: ContainerId) -> Option<Bounds> {
        self.registry().get(&id).copied()
    }

    fn detach(&self, id: ContainerId) {
        self.registry().remove(&id);
        trace!(container:% = id; "Detached off-screen container");
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, BTreeMap<ContainerId, Bounds>> {
        // The map stays consistent even if a holder panicked mid-export.
        self.attached.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An off-screen container exclusively owned by one export.
///
/// Detaches itself from its host when dropped.
#[derive(Debug)]
pub struct TemporaryContainer<'h> {
    host: &'h Host,
    id: ContainerId,
}

impl TemporaryContainer<'_> {
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Detaches the container now. Equivalent to dropping it.
    pub fn remove(self) {}
}

impl Drop for TemporaryContainer<'_> {
    fn drop(&mut self) {
        self.host.detach(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_and_drop() {
        let host = Host::new();
        let container = host.attach_offscreen(Size::new(100.0, 50.0));
        let id = container.id();

        assert!(host.is_attached(id));
        assert_eq!(host.attached_count(), 1);

        drop(container);

        assert!(!host.is_attached(id));
        assert_eq!(host.attached_count(), 0);
    }

    #[test]
    fn test_container_is_offscreen() {
        let host = Host::new();
        let container = host.attach_offscreen(Size::new(100.0, 50.0));

        let bounds = host.container_bounds(container.id()).expect("attached");
        assert!(bounds.max_x() < 0.0);
        assert!(bounds.max_y() < 0.0);
        assert_eq!(bounds.to_size(), Size::new(100.0, 50.0));
    }

    #[test]
    fn test_container_ids_are_unique() {
        let host = Host::new();
        let a = host.attach_offscreen(Size::default());
        let b = host.attach_offscreen(Size::default());
        assert_ne!(a.id(), b.id());
        assert_eq!(host.attached_count(), 2);

        a.remove();
        assert_eq!(host.attached_count(), 1);
        assert!(host.is_attached(b.id()));
    }

    #[test]
    fn test_container_released_on_unwind() {
        let host = Host::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _container = host.attach_offscreen(Size::new(1.0, 1.0));
            panic!("export failed");
        }));

        assert!(result.is_err());
        assert_eq!(host.attached_count(), 0);
    }

    #[test]
    fn test_host_is_sync() {
        let host = Host::new();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let container = host.attach_offscreen(Size::new(1.0, 1.0));
                    assert!(host.is_attached(container.id()));
                });
            }
        });
        assert_eq!(host.attached_count(), 0);
    }
}
