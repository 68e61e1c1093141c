//! Abstract domains for fixed-point data-flow analysis.
//!
//! The centerpiece of this crate is [PowersetDomain], a lattice over sets of facts, which turns
//! any set representation implementing [SetRepr] into a complete lattice by adding dedicated
//! _bottom_ and _top_ elements. Two representations are provided:
//!
//! * [SparseSetValue], a sparse set over a fixed universe of unsigned integers `[0, capacity)`
//!   with O(1) membership, insertion and removal. See [SparseSetAbstractDomain].
//! * [HashedSetValue], a hash set over an unbounded universe. See [HashedSetAbstractDomain].
//!
//! A fixed-point solver typically keeps one [DomainState] per program point, which tracks the
//! number of updates made to it so far, and decides between joining and widening accordingly.
//!
//! ## Example
//!
//! ```
//! use dataflow_domains::{AbstractDomain, SparseSetAbstractDomain};
//!
//! let mut a = SparseSetAbstractDomain::<u32>::with_capacity(8);
//! a.add_all([1, 3, 5]);
//! let mut b = SparseSetAbstractDomain::<u32>::with_capacity(8);
//! b.add_all([3, 5, 7]);
//!
//! a.join_with(&b);
//! assert_eq!(a.size(), Some(4));
//! assert!(b.leq(&a));
//! ```
#![no_std]
#![deny(warnings)]

extern crate alloc;
#[cfg(test)]
#[macro_use]
extern crate std;

mod change_result;
mod config;
mod domain;
mod element;
mod error;
mod kind;
pub mod powerset;
mod state;

pub use self::{
    change_result::ChangeResult,
    config::DomainConfig,
    domain::AbstractDomain,
    element::SparseElement,
    error::DomainError,
    kind::AbstractValueKind,
    powerset::{
        HashedSetAbstractDomain, HashedSetValue, PowersetDomain, SetRepr, SparseSetAbstractDomain,
        SparseSetValue,
    },
    state::DomainState,
};
