//! # rawmem Mapping Endpoint
//!
//! A device-style endpoint through which a user-space caller maps a raw
//! physical address range directly into its own address space. The whole
//! functional surface is one operation: pass the caller's mapping request
//! unchanged to the host's frame-mapping primitive. Everything else is the
//! registration lifecycle that makes the endpoint discoverable.
//!
//! ## Lifecycle
//!
//! 1. Reserve a numeric identity
//! 2. Bind the map operation to it
//! 3. Register a class grouping
//! 4. Publish the discoverable node
//!
//! [`MappingEndpoint::start`] performs these in order and rolls back every
//! completed step if a later one fails; [`MappingEndpoint::stop`] reverses
//! them exactly. No partial registration ever survives a failed start.
//!
//! ## Trust boundary
//!
//! The endpoint does not validate the physical range a caller asks for.
//! Whoever can reach the published node can map any physical frame,
//! host-owned memory included. Restricting access to the node is the only
//! safeguard, and it belongs to the host's permission model, not to this
//! crate.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

mod endpoint;


pub use endpoint::MappingEndpoint;

use rawmem_hal::HostError;

/// Symbolic name of the endpoint. Identity reservation, the class and the
/// published node name all derive from it.
pub const RAWMEM_NAME: &str = "rawmem";

/// Number of identities the endpoint reserves (a singleton device: one
/// minor number).
pub const RAWMEM_DEV_COUNT: u32 = 1;

/// Endpoint result type.
pub type EndpointResult<T> = Result<T, EndpointError>;

/// Endpoint errors.
///
/// Each variant wrapping a [`HostError`] carries the host's code unchanged.
/// All are terminal for the operation in which they occur; nothing is
/// retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointError {
    /// No identity could be reserved from the host's namespace
    IdentityExhausted(HostError),
    /// Binding the map operation to the reserved identity failed
    BindFailed(HostError),
    /// Registering the class grouping failed
    ClassCreateFailed(HostError),
    /// The host's mapping primitive rejected a map request
    MappingFailed(HostError),
    /// `start()` was called while already registered
    AlreadyRegistered,
}

/// Registration state of the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointState {
    /// Not registered; `map` must not be routed here
    Unregistered,
    /// Registered and reachable through the published node
    Registered,
}
