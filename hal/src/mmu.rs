//! # Raw Mapping Primitive
//!
//! The contract the endpoint consumes from the host's virtual-memory
//! subsystem: install a linear mapping from a virtual range onto a
//! contiguous run of physical frames.

use crate::{HostResult, PhysFrame, VirtAddr};
use bitflags::bitflags;

bitflags! {
    /// Protection attributes requested for a mapped region
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PageFlags: u64 {
        /// Page is present in memory
        const PRESENT = 1 << 0;
        /// Page is writable
        const WRITABLE = 1 << 1;
        /// Page is accessible from user mode
        const USER = 1 << 2;
        /// Page is write-through cached
        const WRITE_THROUGH = 1 << 3;
        /// Page caching is disabled
        const NO_CACHE = 1 << 4;
        /// Page is not executable
        const NO_EXECUTE = 1 << 63;
    }
}

impl PageFlags {
    /// Flags for a read-write user mapping
    pub const fn user_data() -> Self {
        Self::PRESENT.union(Self::WRITABLE).union(Self::USER).union(Self::NO_EXECUTE)
    }

    /// Flags for a read-only user mapping
    pub const fn user_rodata() -> Self {
        Self::PRESENT.union(Self::USER).union(Self::NO_EXECUTE)
    }

    /// Flags for an uncached read-write user mapping (device memory)
    pub const fn user_mmio() -> Self {
        Self::user_data().union(Self::NO_CACHE)
    }
}

/// Raw page-frame-range mapping primitive.
///
/// Installs page-table entries in the calling process's address space so
/// that `len` bytes starting at `start` alias the physical frames starting
/// at `frame_offset`. Either the whole range is mapped or the call fails
/// atomically; the resulting page-table state is owned and later torn down
/// by the host, not by the caller.
pub trait FrameMapper: Send + Sync {
    /// Map `len` bytes at `start` onto the frames starting at `frame_offset`
    /// with the given protection attributes.
    ///
    /// The host validates `start` and `len` (page-aligned, inside the
    /// caller's address space) before this is reached. Nothing validates
    /// `frame_offset`.
    ///
    /// # Safety
    ///
    /// This exposes the literal physical frames at `frame_offset` to the
    /// calling process. The caller must ensure the host's access-control
    /// policy permits the calling process to see that physical range;
    /// mapping host-owned memory read-write corrupts the host.
    unsafe fn map_frame_range(
        &self,
        start: VirtAddr,
        frame_offset: PhysFrame,
        len: u64,
        flags: PageFlags,
    ) -> HostResult<()>;
}
