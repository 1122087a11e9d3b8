//! Fundamental types for the chained action service.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! step descriptors, result envelopes, submissions, account addresses, lamport
//! amounts, and the action error type.

pub mod address;
pub mod amount;
pub mod descriptor;
pub mod envelope;
pub mod error;
pub mod submission;

pub use address::AccountAddress;
pub use amount::{Lamports, LAMPORTS_PER_SOL};
pub use descriptor::{
    ActionKind, ActionLink, DescriptorKind, DescriptorLinks, ParameterSpec, ParameterType,
    StepDescriptor,
};
pub use envelope::{ErrorBody, MessageLinks, NextAction, ResultEnvelope};
pub use error::{ActionError, AmountError, DescriptorError, UpstreamService};
pub use submission::{PostRequest, Submission};
