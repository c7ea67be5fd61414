//! # Discovery/Bind Contract
//!
//! The registration surface the endpoint consumes from the host: reserve a
//! numeric identity, bind an operations object to it, register a class
//! grouping, and publish a named node under that class. The host owns the
//! actual naming, permissions and node creation; this module only describes
//! the calls the endpoint makes.

use crate::{DeviceId, HostResult, PhysFrame, VirtAddr};
use crate::mmu::PageFlags;
use alloc::sync::Arc;

/// A single memory-mapping request from a caller.
///
/// Transient and caller-owned: it exists only for the duration of one map
/// operation and is never stored. `frame_offset` is the physical frame
/// number the caller encoded in the request's page-offset field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingRequest {
    /// Start of the destination virtual region
    pub start: VirtAddr,
    /// Length of the region in bytes
    pub len: u64,
    /// First physical frame to map
    pub frame_offset: PhysFrame,
    /// Requested protection attributes
    pub flags: PageFlags,
}

impl MappingRequest {
    /// Create a request
    pub const fn new(start: VirtAddr, len: u64, frame_offset: PhysFrame, flags: PageFlags) -> Self {
        Self { start, len, frame_offset, flags }
    }
}

/// Operations a bound identity resolves to.
///
/// When a caller opens the discoverable node and issues a memory-mapping
/// request, the host routes it to the `mmap` of whatever was bound to the
/// node's identity.
pub trait DeviceOps: Send + Sync {
    /// Handle a memory-mapping request from a caller.
    ///
    /// Host error codes are returned unchanged.
    fn mmap(&self, request: &MappingRequest) -> HostResult<()>;
}

/// Identity allocation, bind and discovery registration.
///
/// The four steps of making an endpoint reachable, plus their inverses.
/// Node publication has no failure signal: once the prior steps succeeded
/// the host guarantees it.
pub trait DeviceNamespace: Send + Sync {
    /// Opaque handle to a registered class grouping
    type Class: Send;

    /// Reserve `count` consecutive identities under the given name,
    /// returning the first.
    fn allocate_ids(&self, name: &str, count: u32) -> HostResult<DeviceId>;

    /// Release identities previously reserved with [`allocate_ids`].
    ///
    /// [`allocate_ids`]: DeviceNamespace::allocate_ids
    fn release_ids(&self, id: DeviceId, count: u32);

    /// Bind an operations object to `count` identities starting at `id`, so
    /// that opening a node with one of those identities resolves to `ops`.
    fn bind(&self, id: DeviceId, count: u32, ops: Arc<dyn DeviceOps>) -> HostResult<()>;

    /// Remove a binding installed with [`bind`].
    ///
    /// [`bind`]: DeviceNamespace::bind
    fn unbind(&self, id: DeviceId);

    /// Register a class grouping under which nodes can be published.
    fn create_class(&self, name: &str) -> HostResult<Self::Class>;

    /// Unregister a class grouping. All nodes published under it must have
    /// been unpublished first.
    fn destroy_class(&self, class: Self::Class);

    /// Publish a discoverable node under `class` with the given display
    /// name, routed via `id`.
    fn publish_node(&self, class: &Self::Class, id: DeviceId, name: &str);

    /// Remove a node published with [`publish_node`].
    ///
    /// [`publish_node`]: DeviceNamespace::publish_node
    fn unpublish_node(&self, class: &Self::Class, id: DeviceId);
}
