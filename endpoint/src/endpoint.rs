//! # Mapping Endpoint
//!
//! The single component of this system: owns the registration record and
//! forwards map requests to the host's frame-mapping primitive.

use crate::{EndpointError, EndpointResult, EndpointState, RAWMEM_DEV_COUNT, RAWMEM_NAME};
use alloc::sync::Arc;
use rawmem_hal::chardev::{DeviceNamespace, DeviceOps, MappingRequest};
use rawmem_hal::mmu::FrameMapper;
use rawmem_hal::{DeviceId, HostResult};

/// Operations object bound to the reserved identity.
///
/// This is what the host routes a caller's mapping request to once the
/// endpoint is registered.
struct RawMapOps {
    mapper: Arc<dyn FrameMapper>,
}

impl DeviceOps for RawMapOps {
    fn mmap(&self, request: &MappingRequest) -> HostResult<()> {
        // SAFETY: the host validated the virtual region before routing the
        // request here. The physical range is caller-chosen by contract;
        // access control on the published node is the only safeguard.
        unsafe {
            self.mapper.map_frame_range(
                request.start,
                request.frame_offset,
                request.len,
                request.flags,
            )
        }
    }
}

/// Live registration: identity plus class handle, created by `start` and
/// consumed by `stop`, never mutated in between.
struct DeviceRegistration<C> {
    id: DeviceId,
    class: C,
}

/// The mapping endpoint.
///
/// Holds the host namespace it registers with, the operations object it
/// binds, and the registration record while in [`EndpointState::Registered`].
/// `map` touches no shared mutable state, so concurrent callers need no
/// synchronization; `start` and `stop` are serialized by the host's module
/// lifecycle.
pub struct MappingEndpoint<N: DeviceNamespace> {
    name: &'static str,
    namespace: N,
    ops: Arc<RawMapOps>,
    registration: Option<DeviceRegistration<N::Class>>,
}

impl<N: DeviceNamespace> MappingEndpoint<N> {
    /// Create an unregistered endpoint named [`RAWMEM_NAME`].
    pub fn new(namespace: N, mapper: Arc<dyn FrameMapper>) -> Self {
        Self::with_name(RAWMEM_NAME, namespace, mapper)
    }

    /// Create an unregistered endpoint with an explicit symbolic name.
    ///
    /// The reserved identity, the class and the published node name all
    /// derive from this name, so distinct instances stay distinguishable.
    pub fn with_name(name: &'static str, namespace: N, mapper: Arc<dyn FrameMapper>) -> Self {
        Self {
            name,
            namespace,
            ops: Arc::new(RawMapOps { mapper }),
            registration: None,
        }
    }

    /// The endpoint's symbolic name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current registration state.
    pub fn state(&self) -> EndpointState {
        if self.registration.is_some() {
            EndpointState::Registered
        } else {
            EndpointState::Unregistered
        }
    }

    /// The identity reserved by `start`, while registered.
    pub fn device_id(&self) -> Option<DeviceId> {
        self.registration.as_ref().map(|r| r.id)
    }

    /// Register the endpoint: reserve an identity, bind the map operation,
    /// register the class, publish the node.
    ///
    /// Strictly ordered and all-or-nothing: a failure at any step rolls
    /// back every step already done and leaves zero residual registration
    /// state. Fails fast with [`EndpointError::AlreadyRegistered`] if called
    /// while registered, so a single identity is never shared.
    pub fn start(&mut self) -> EndpointResult<()> {
        if self.registration.is_some() {
            return Err(EndpointError::AlreadyRegistered);
        }

        let id = self
            .namespace
            .allocate_ids(self.name, RAWMEM_DEV_COUNT)
            .map_err(EndpointError::IdentityExhausted)?;

        let ops: Arc<dyn DeviceOps> = self.ops.clone();
        if let Err(e) = self.namespace.bind(id, RAWMEM_DEV_COUNT, ops) {
            self.namespace.release_ids(id, RAWMEM_DEV_COUNT);
            return Err(EndpointError::BindFailed(e));
        }

        let class = match self.namespace.create_class(self.name) {
            Ok(class) => class,
            Err(e) => {
                log::error!("error creating {} class", self.name);
                self.namespace.unbind(id);
                self.namespace.release_ids(id, RAWMEM_DEV_COUNT);
                return Err(EndpointError::ClassCreateFailed(e));
            }
        };

        self.namespace.publish_node(&class, id, self.name);
        log::info!("{} device {},{} registered", self.name, id.major(), id.minor());

        self.registration = Some(DeviceRegistration { id, class });
        Ok(())
    }

    /// Unregister the endpoint, reversing `start` in opposite order:
    /// unpublish the node, destroy the class, unbind and release the
    /// identity. Does nothing if not registered.
    pub fn stop(&mut self) {
        let Some(DeviceRegistration { id, class }) = self.registration.take() else {
            return;
        };

        self.namespace.unpublish_node(&class, id);
        self.namespace.destroy_class(class);
        self.namespace.unbind(id);
        self.namespace.release_ids(id, RAWMEM_DEV_COUNT);

        log::info!("{} device {},{} unregistered", self.name, id.major(), id.minor());
    }

    /// Map a physical frame range into the calling process.
    ///
    /// Pure pass-through: the request's virtual start, frame offset, length
    /// and protection attributes reach the host primitive unchanged, and the
    /// primitive's error code comes back unchanged inside
    /// [`EndpointError::MappingFailed`]. Only valid while registered; the
    /// host never routes a request here outside that window.
    ///
    /// No validation of the physical range happens here. See the crate-level
    /// notes on the trust boundary.
    pub fn map(&self, request: &MappingRequest) -> EndpointResult<()> {
        self.ops.mmap(request).map_err(EndpointError::MappingFailed)
    }
}

impl<N: DeviceNamespace> core::fmt::Debug for MappingEndpoint<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MappingEndpoint")
            .field("name", &self.name)
            .field("state", &self.state())
            .field("device_id", &self.device_id())
            .finish()
    }
}
