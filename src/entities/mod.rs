//! Entity type definitions
//!
//! The toolkit tracks a single entity type:
//!
//! - [`Rfp`] - A sales Request for Proposal with its milestone dates,
//!   pipeline status, quoted value and owning team

pub mod rfp;

pub use rfp::{Outcome, Rfp, RfpStatus};
