//! Token-weighted governance over a shared treasury and a mintable token.
//!
//! Lifecycle: propose (fee-priced, opens a ballot) → preview (side-effect
//! free decode, any number of times) → execute (after the ballot ends; the
//! action applies only if the ballot weight strictly exceeds the configured
//! share of the live token supply).
//!
//! Five actions: grants, minter approvals, crowdfunding campaigns, settings
//! changes, and retirement in favour of a successor system.

pub mod access;
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod host;
pub mod majority;
pub mod registry;
pub mod settings;

pub use action::{Action, ActionKind};
pub use config::{validate, CampaignConfig, VotingBounds, VotingConfig};
pub use engine::{Collaborators, ExecutionOutcome, GovernanceEngine, GovernanceState, SystemStatus};
pub use error::{ConfigViolation, ErrorKind, GovernanceError, HostError};
pub use event::{EventLog, GovernanceEvent};
pub use host::{BallotBook, CallContext, Clock, Crowdfunding, GovernanceToken, Treasury};
pub use registry::{GovernanceAction, ProposalRegistry};
pub use settings::{GovernanceSettings, VotingTable};
