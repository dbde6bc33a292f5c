//! Core governance engine: proposals through propose, preview and execute.
//!
//! Every public operation is one serial step. Collaborators are untrusted and
//! may call back into the engine before they return, so no borrow of the
//! engine's storage is ever held across a collaborator call, and a proposal
//! is deactivated before anything external runs on its behalf.

mod dispatch;

use crate::access::only_after;
use crate::action::Action;
use crate::config::{validate_with, CampaignConfig, VotingBounds, VotingConfig};
use crate::error::GovernanceError;
use crate::event::{EventLog, GovernanceEvent};
use crate::host::{BallotBook, CallContext, Clock, Crowdfunding, GovernanceToken, Treasury};
use crate::majority;
use crate::registry::{GovernanceAction, ProposalRegistry};
use crate::settings::GovernanceSettings;
use agora_types::{AccountId, Amount, Asset, BallotId, Timestamp};
use dispatch::DispatchMode;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Whether the system still accepts calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemStatus {
    Operational,
    /// A Retire action applied; every entry point now fails.
    Retired,
}

/// Result of a successful `execute`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The ballot cleared the majority and the action ran.
    Applied,
    /// The ballot fell short; the proposal was discarded.
    Rejected,
}

/// The external components the engine drives.
#[derive(Clone)]
pub struct Collaborators {
    pub clock: Rc<dyn Clock>,
    pub ballots: Rc<dyn BallotBook>,
    pub token: Rc<dyn GovernanceToken>,
    pub treasury: Rc<dyn Treasury>,
    pub crowdfunding: Rc<dyn Crowdfunding>,
}

/// Persisted state of the governance system.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceState {
    pub admin: AccountId,
    pub voting: VotingConfig,
    pub token: AccountId,
    pub campaigns: Vec<AccountId>,
    pub proposals: ProposalRegistry,
    pub status: SystemStatus,
}

pub struct GovernanceEngine {
    id: AccountId,
    host: Collaborators,
    state: RefCell<GovernanceState>,
    events: EventLog,
    bounds: VotingBounds,
}

impl GovernanceEngine {
    /// Create a system identified by `id`, validating its initial voting table.
    pub fn new(
        id: AccountId,
        admin: AccountId,
        voting: VotingConfig,
        host: Collaborators,
    ) -> Result<Self, GovernanceError> {
        let voting = validate_with(voting, &VotingBounds::STANDARD)?;
        let state = GovernanceState {
            admin,
            voting,
            token: host.token.id(),
            campaigns: Vec::new(),
            proposals: ProposalRegistry::new(),
            status: SystemStatus::Operational,
        };
        info!(system = %id, admin = %state.admin, token = %state.token, %voting, "governance system created");
        Ok(Self::from_state(id, state, host))
    }

    /// Build a system from loaded settings.
    ///
    /// The settings must name the token the host actually provides.
    pub fn from_settings(
        settings: &GovernanceSettings,
        host: Collaborators,
    ) -> Result<Self, GovernanceError> {
        let provided = host.token.id();
        if settings.token != provided {
            return Err(GovernanceError::Settings(format!(
                "configured token {} does not match host token {}",
                settings.token, provided
            )));
        }
        Self::new(
            settings.system.clone(),
            settings.admin.clone(),
            settings.voting_config()?,
            host,
        )
    }

    /// Rebuild a system from bytes produced by [`GovernanceEngine::save_state`].
    pub fn restore(
        id: AccountId,
        data: &[u8],
        host: Collaborators,
    ) -> Result<Self, GovernanceError> {
        let state: GovernanceState = bincode::deserialize(data)?;
        debug!(system = %id, proposals = state.proposals.len(), "governance state restored");
        Ok(Self::from_state(id, state, host))
    }

    fn from_state(id: AccountId, state: GovernanceState, host: Collaborators) -> Self {
        Self {
            id,
            host,
            state: RefCell::new(state),
            events: EventLog::new(),
            bounds: VotingBounds::STANDARD,
        }
    }

    /// Validate configurations supplied from now on against `bounds`.
    ///
    /// Proposals already pending keep the arguments they were accepted with.
    pub fn with_bounds(mut self, bounds: VotingBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Serialize the persisted state (admin, voting table, token, campaigns,
    /// proposals, status).
    pub fn save_state(&self) -> Result<Vec<u8>, GovernanceError> {
        Ok(bincode::serialize(&*self.state.borrow())?)
    }

    // ── Proposals ─────────────────────────────────────────────────────────

    /// Propose paying `amount` of `asset` from the treasury to `recipient`.
    pub fn propose_grant(
        &self,
        ctx: &CallContext,
        recipient: AccountId,
        amount: Amount,
        asset: Asset,
        deadline: Timestamp,
    ) -> Result<BallotId, GovernanceError> {
        let voting = self.admit(ctx)?;
        if let Asset::Token(token) = &asset {
            if self.host.token.can_control(token) {
                return Err(GovernanceError::ControlledAsset(token.clone()));
            }
        }
        self.open_proposal(
            ctx,
            &voting,
            deadline,
            Action::Grant {
                recipient,
                amount,
                asset,
            },
        )
    }

    /// Propose launching a crowdfunding campaign. The beneficiary is this
    /// system when `beneficiary_is_self`, otherwise the proposer.
    pub fn propose_crowdfunding(
        &self,
        ctx: &CallContext,
        config: CampaignConfig,
        beneficiary_is_self: bool,
        deadline: Timestamp,
    ) -> Result<BallotId, GovernanceError> {
        let voting = self.admit(ctx)?;
        let config = config.validate_with(&self.bounds)?;
        let beneficiary = if beneficiary_is_self {
            self.id.clone()
        } else {
            ctx.caller.clone()
        };
        self.open_proposal(
            ctx,
            &voting,
            deadline,
            Action::CreateCrowdFunding {
                config,
                beneficiary,
            },
        )
    }

    /// Propose replacing the admin and the voting table.
    pub fn propose_settings(
        &self,
        ctx: &CallContext,
        admin: AccountId,
        config: VotingConfig,
        deadline: Timestamp,
    ) -> Result<BallotId, GovernanceError> {
        let voting = self.admit(ctx)?;
        let config = validate_with(config, &self.bounds)?;
        self.open_proposal(
            ctx,
            &voting,
            deadline,
            Action::ChangeSettings { admin, config },
        )
    }

    /// Propose raising the minting allowance of `minter` by `amount`.
    pub fn propose_minter(
        &self,
        ctx: &CallContext,
        minter: AccountId,
        amount: Amount,
        deadline: Timestamp,
    ) -> Result<BallotId, GovernanceError> {
        let voting = self.admit(ctx)?;
        self.open_proposal(
            ctx,
            &voting,
            deadline,
            Action::ApproveMinter { minter, amount },
        )
    }

    /// Propose handing the token to `successor` and retiring this system.
    pub fn propose_retirement(
        &self,
        ctx: &CallContext,
        successor: AccountId,
        deadline: Timestamp,
    ) -> Result<BallotId, GovernanceError> {
        let voting = self.admit(ctx)?;
        self.open_proposal(ctx, &voting, deadline, Action::Retire { successor })
    }

    /// Status and fee check shared by every `propose_*` entry point.
    fn admit(&self, ctx: &CallContext) -> Result<VotingConfig, GovernanceError> {
        self.ensure_operational()?;
        let voting = self.state.borrow().voting;
        if ctx.value < voting.proposal_fee {
            return Err(GovernanceError::InsufficientPayment {
                paid: ctx.value,
                fee: voting.proposal_fee,
            });
        }
        Ok(voting)
    }

    fn open_proposal(
        &self,
        ctx: &CallContext,
        voting: &VotingConfig,
        deadline: Timestamp,
        action: Action,
    ) -> Result<BallotId, GovernanceError> {
        let now = self.host.clock.now();
        if deadline <= now {
            return Err(GovernanceError::DeadlineNotInFuture { deadline, now });
        }
        let (kind, payload) = action.encode()?;
        let token = self.state.borrow().token.clone();
        let lock_time = deadline.saturating_add(voting.lock_duration_secs);

        let ballot = self.host.ballots.open(&self.id, &token, deadline, lock_time)?;

        let created = self
            .state
            .borrow_mut()
            .proposals
            .create(ballot, kind, payload);
        if let Err(e) = created {
            self.host.ballots.destroy(&ballot);
            return Err(e);
        }

        self.host.treasury.accept(&ctx.caller, ctx.value);
        self.events.emit(GovernanceEvent::BallotCreated {
            ballot,
            proposer: ctx.caller.clone(),
            end_time: deadline,
            lock_time,
        });
        info!(%ballot, %kind, proposer = %ctx.caller, end = %deadline, lock = %lock_time, "proposal created");
        Ok(ballot)
    }

    // ── Preview & execution ───────────────────────────────────────────────

    /// Decode a pending proposal and emit its preview event. Changes nothing.
    pub fn preview(&self, ballot: BallotId) -> Result<Action, GovernanceError> {
        self.ensure_operational()?;
        let entry = self.state.borrow().proposals.active(&ballot)?.clone();
        let action = entry.decode()?;
        self.dispatch(ballot, &action, DispatchMode::Preview)?;
        debug!(%ballot, %action, "proposal previewed");
        Ok(action)
    }

    /// Close a ballot whose voting window has ended.
    ///
    /// The proposal is deactivated before the majority is evaluated and
    /// before any collaborator runs on its behalf. Whatever the outcome, the
    /// entry is then deleted and the ballot destroyed; a failing action still
    /// consumes its proposal.
    pub fn execute(&self, ballot: BallotId) -> Result<ExecutionOutcome, GovernanceError> {
        self.ensure_operational()?;
        self.state.borrow().proposals.active(&ballot)?;
        let end_time = self
            .host
            .ballots
            .end_time(&ballot)
            .ok_or(GovernanceError::BallotNotFound(ballot))?;
        only_after(ballot, end_time, self.host.clock.now())?;

        let entry = self.state.borrow_mut().proposals.begin_execution(&ballot)?;
        debug!(%ballot, kind = %entry.kind, "execution started");

        let weight = self.host.ballots.total_weight(&ballot);
        let supply = self.host.token.total_supply();
        let majority_percent = self.state.borrow().voting.majority_percent;
        let passed = majority::passes(weight, supply, majority_percent);
        info!(
            %ballot,
            %weight,
            %supply,
            threshold = %majority::threshold(supply, majority_percent),
            passed,
            "majority evaluated"
        );

        let result = if passed {
            self.apply(ballot, &entry)
        } else {
            Ok(())
        };

        self.state.borrow_mut().proposals.delete(&ballot);
        self.host.ballots.destroy(&ballot);
        self.events
            .emit(GovernanceEvent::ProposalClosed { ballot, passed });

        match result {
            Ok(()) if passed => Ok(ExecutionOutcome::Applied),
            Ok(()) => Ok(ExecutionOutcome::Rejected),
            Err(e) => {
                warn!(%ballot, error = %e, "proposal consumed without applying");
                Err(e)
            }
        }
    }

    fn apply(&self, ballot: BallotId, entry: &GovernanceAction) -> Result<(), GovernanceError> {
        let action = entry.decode()?;
        self.dispatch(ballot, &action, DispatchMode::Apply)?;
        info!(%ballot, %action, "proposal applied");
        Ok(())
    }

    /// Accept value sent to the system outside a proposal.
    pub fn receive(&self, ctx: &CallContext) -> Result<(), GovernanceError> {
        self.ensure_operational()?;
        self.host.treasury.accept(&ctx.caller, ctx.value);
        self.events.emit(GovernanceEvent::PaymentReceived {
            from: ctx.caller.clone(),
            amount: ctx.value,
        });
        debug!(from = %ctx.caller, amount = %ctx.value, "payment received");
        Ok(())
    }

    fn ensure_operational(&self) -> Result<(), GovernanceError> {
        match self.state.borrow().status {
            SystemStatus::Operational => Ok(()),
            SystemStatus::Retired => Err(GovernanceError::Retired),
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn admin(&self) -> AccountId {
        self.state.borrow().admin.clone()
    }

    pub fn voting_config(&self) -> VotingConfig {
        self.state.borrow().voting
    }

    pub fn token(&self) -> AccountId {
        self.state.borrow().token.clone()
    }

    pub fn campaigns(&self) -> Vec<AccountId> {
        self.state.borrow().campaigns.clone()
    }

    /// The stored entry for `ballot`, active or not.
    pub fn proposal(&self, ballot: &BallotId) -> Option<GovernanceAction> {
        self.state.borrow().proposals.get(ballot).cloned()
    }

    pub fn pending_proposals(&self) -> usize {
        self.state.borrow().proposals.len()
    }

    pub fn status(&self) -> SystemStatus {
        self.state.borrow().status
    }

    pub fn events(&self) -> Vec<GovernanceEvent> {
        self.events.snapshot()
    }

    pub fn subscribe(&self, listener: Box<dyn Fn(&GovernanceEvent)>) {
        self.events.subscribe(listener);
    }
}
