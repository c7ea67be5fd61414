//! # rawmem HAL - Host Interface Seams
//!
//! This crate defines the two contracts the mapping endpoint consumes from
//! its host environment:
//!
//! - [`chardev::DeviceNamespace`]: identity allocation, bind, class
//!   registration and node publication (the discovery/bind contract).
//! - [`mmu::FrameMapper`]: the raw page-frame-range mapping primitive of the
//!   host's virtual-memory subsystem.
//!
//! The endpoint is a pure pass-through on top of these seams. Nothing here
//! validates physical ranges: deciding which frames are legitimate to expose
//! is the host administrator's problem, not this crate's.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

pub mod chardev;
pub mod mmu;

/// Result type for host primitive calls.
pub type HostResult<T> = Result<T, HostError>;

/// Error codes reported by host primitives.
///
/// These are surfaced unchanged through the endpoint; the endpoint never
/// interprets, retries or downgrades them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostError {
    /// The identity namespace has no free entries
    Exhausted,
    /// Host-side allocation failed (e.g. page-table resources)
    OutOfMemory,
    /// Invalid parameter or protection combination
    InvalidParameter,
    /// Address is invalid or not aligned
    InvalidAddress,
    /// Permission denied by the host
    PermissionDenied,
    /// The physical range overlaps a host-reserved region
    ReservedRegion,
    /// Hardware reported an error
    HardwareError,
    /// The operation is not supported by this host
    NotSupported,
}

/// Size in bytes of the host's base page.
pub const PAGE_SIZE: u64 = 4096;

/// Virtual address in a caller's address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct VirtAddr(u64);

impl VirtAddr {
    /// Create a new virtual address
    #[inline]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Get the raw address value
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Check if the address is aligned to the given alignment
    #[inline]
    pub const fn is_aligned(self, align: u64) -> bool {
        self.0 % align == 0
    }

    /// Check if the address sits on a page boundary
    #[inline]
    pub const fn is_page_aligned(self) -> bool {
        self.is_aligned(PAGE_SIZE)
    }

    /// Add a byte offset to the address
    #[inline]
    pub const fn add(self, offset: u64) -> Self {
        Self(self.0 + offset)
    }
}

/// Physical page-frame number.
///
/// A frame number, not a byte address: frame `n` covers the physical bytes
/// `[n * PAGE_SIZE, (n + 1) * PAGE_SIZE)`. This is the unit the caller's
/// page-offset field carries and the unit the mapping primitive consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PhysFrame(u64);

impl PhysFrame {
    /// Create a frame from its number
    #[inline]
    pub const fn new(number: u64) -> Self {
        Self(number)
    }

    /// Get the frame number
    #[inline]
    pub const fn number(self) -> u64 {
        self.0
    }

    /// Get the physical byte address of the frame's first byte
    #[inline]
    pub const fn base_address(self) -> u64 {
        self.0 * PAGE_SIZE
    }

    /// Frame containing the given physical byte address
    #[inline]
    pub const fn containing_address(addr: u64) -> Self {
        Self(addr / PAGE_SIZE)
    }
}

/// Numeric identity assigned to a discoverable endpoint.
///
/// The major/minor pair the host's discovery layer uses to route operations
/// to a specific device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId {
    major: u32,
    minor: u32,
}

impl DeviceId {
    /// Create an identity from its major/minor pair
    #[inline]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Get the major number
    #[inline]
    pub const fn major(self) -> u32 {
        self.major
    }

    /// Get the minor number
    #[inline]
    pub const fn minor(self) -> u32 {
        self.minor
    }
}
