//! Operation definitions and dispatch
//!
//! [`Operation`] is closed: every kind a transaction may carry is one
//! variant, and [`Operation::validate`] matches all of them without a
//! wildcard arm. A new kind therefore cannot be added without also deciding
//! how it is validated.

use serde::{Deserialize, Serialize};
use strata_core::{ProtocolConfig, Result};
use tracing::{debug, trace};

mod checks;

/// Account creation and maintenance
pub mod account;
/// Posts, comments and votes
pub mod content;
/// Application-defined payloads
pub mod custom;
/// Three-party escrow
pub mod escrow;
/// Price feeds and the order book
pub mod market;
/// Work submissions and misbehavior reports
pub mod mining;
/// Account recovery and reset
pub mod recovery;
/// Reward claims
pub mod rewards;
/// Transfers, savings and conversions
pub mod transfer;
/// Staking and delegation
pub mod vesting;
/// Witness registration and voting
pub mod witness;

pub use account::*;
pub use content::*;
pub use custom::*;
pub use escrow::*;
pub use market::*;
pub use mining::*;
pub use recovery::*;
pub use rewards::*;
pub use transfer::*;
pub use vesting::*;
pub use witness::*;

/// Stateless well-formedness check
///
/// Implementations read only `self` and `config`, return the first violated
/// invariant, and never mutate anything.
pub trait Validate {
    /// Check the value against its invariants
    fn validate(&self, config: &ProtocolConfig) -> Result<()>;
}

/// Every operation a transaction may carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    // ========== Content ==========
    /// Cast a vote on a comment
    Vote(VoteOperation),
    /// Publish or edit a comment
    Comment(CommentOperation),
    /// Set payout terms of a comment
    CommentOptions(CommentOptionsOperation),
    /// Remove a comment
    DeleteComment(DeleteCommentOperation),

    // ========== Transfers ==========
    /// Send liquid or pegged tokens
    Transfer(TransferOperation),
    /// Deposit into savings
    TransferToSavings(TransferToSavingsOperation),
    /// Begin a savings withdrawal
    TransferFromSavings(TransferFromSavingsOperation),
    /// Cancel a savings withdrawal
    CancelTransferFromSavings(CancelTransferFromSavingsOperation),
    /// Convert pegged tokens to liquid
    Convert(ConvertOperation),

    // ========== Staking ==========
    /// Stake liquid tokens
    TransferToVesting(TransferToVestingOperation),
    /// Begin unstaking
    WithdrawVesting(WithdrawVestingOperation),
    /// Route unstaking payments
    SetWithdrawVestingRoute(SetWithdrawVestingRouteOperation),
    /// Lend stake
    DelegateVestingShares(DelegateVestingSharesOperation),

    // ========== Accounts ==========
    /// Create an account for a fee
    AccountCreate(AccountCreateOperation),
    /// Create an account with delegated stake
    AccountCreateWithDelegation(AccountCreateWithDelegationOperation),
    /// Update an account
    AccountUpdate(AccountUpdateOperation),
    /// Claim an account creation token
    ClaimAccount(ClaimAccountOperation),
    /// Redeem an account creation token
    CreateClaimedAccount(CreateClaimedAccountOperation),

    // ========== Witnesses ==========
    /// Register or update a witness
    WitnessUpdate(WitnessUpdateOperation),
    /// Update witness properties by key
    WitnessSetProperties(WitnessSetPropertiesOperation),
    /// Vote for a witness
    AccountWitnessVote(AccountWitnessVoteOperation),
    /// Proxy witness votes
    AccountWitnessProxy(AccountWitnessProxyOperation),
    /// Publish a price feed
    FeedPublish(FeedPublishOperation),

    // ========== Market ==========
    /// Place an order by minimum proceeds
    LimitOrderCreate(LimitOrderCreateOperation),
    /// Place an order by exchange rate
    LimitOrderCreate2(LimitOrderCreate2Operation),
    /// Cancel an order
    LimitOrderCancel(LimitOrderCancelOperation),

    // ========== Escrow ==========
    /// Place funds in escrow
    EscrowTransfer(EscrowTransferOperation),
    /// Ratify an escrow
    EscrowApprove(EscrowApproveOperation),
    /// Dispute an escrow
    EscrowDispute(EscrowDisputeOperation),
    /// Release escrowed funds
    EscrowRelease(EscrowReleaseOperation),

    // ========== Recovery ==========
    /// Propose a recovered owner authority
    RequestAccountRecovery(RequestAccountRecoveryOperation),
    /// Complete a recovery
    RecoverAccount(RecoverAccountOperation),
    /// Change recovery partner
    ChangeRecoveryAccount(ChangeRecoveryAccountOperation),
    /// Reset an inactive account
    ResetAccount(ResetAccountOperation),
    /// Change reset account
    SetResetAccount(SetResetAccountOperation),
    /// Give up governance voting
    DeclineVotingRights(DeclineVotingRightsOperation),

    // ========== Rewards ==========
    /// Claim core-token rewards
    ClaimRewardBalance(ClaimRewardBalanceOperation),
    /// Claim rewards in any tokens
    ClaimRewardBalance2(ClaimRewardBalance2Operation),

    // ========== Custom ==========
    /// Opaque binary payload
    Custom(CustomOperation),
    /// JSON payload
    CustomJson(CustomJsonOperation),
    /// Binary payload with ad hoc authorities
    CustomBinary(CustomBinaryOperation),

    // ========== Mining ==========
    /// Legacy work submission
    Pow(PowOperation),
    /// Second-generation work submission
    Pow2(Pow2Operation),
    /// Double-production evidence
    ReportOverProduction(ReportOverProductionOperation),
}

impl Operation {
    /// Wire name of the operation kind
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Vote(_) => "vote",
            Operation::Comment(_) => "comment",
            Operation::CommentOptions(_) => "comment_options",
            Operation::DeleteComment(_) => "delete_comment",
            Operation::Transfer(_) => "transfer",
            Operation::TransferToSavings(_) => "transfer_to_savings",
            Operation::TransferFromSavings(_) => "transfer_from_savings",
            Operation::CancelTransferFromSavings(_) => "cancel_transfer_from_savings",
            Operation::Convert(_) => "convert",
            Operation::TransferToVesting(_) => "transfer_to_vesting",
            Operation::WithdrawVesting(_) => "withdraw_vesting",
            Operation::SetWithdrawVestingRoute(_) => "set_withdraw_vesting_route",
            Operation::DelegateVestingShares(_) => "delegate_vesting_shares",
            Operation::AccountCreate(_) => "account_create",
            Operation::AccountCreateWithDelegation(_) => "account_create_with_delegation",
            Operation::AccountUpdate(_) => "account_update",
            Operation::ClaimAccount(_) => "claim_account",
            Operation::CreateClaimedAccount(_) => "create_claimed_account",
            Operation::WitnessUpdate(_) => "witness_update",
            Operation::WitnessSetProperties(_) => "witness_set_properties",
            Operation::AccountWitnessVote(_) => "account_witness_vote",
            Operation::AccountWitnessProxy(_) => "account_witness_proxy",
            Operation::FeedPublish(_) => "feed_publish",
            Operation::LimitOrderCreate(_) => "limit_order_create",
            Operation::LimitOrderCreate2(_) => "limit_order_create2",
            Operation::LimitOrderCancel(_) => "limit_order_cancel",
            Operation::EscrowTransfer(_) => "escrow_transfer",
            Operation::EscrowApprove(_) => "escrow_approve",
            Operation::EscrowDispute(_) => "escrow_dispute",
            Operation::EscrowRelease(_) => "escrow_release",
            Operation::RequestAccountRecovery(_) => "request_account_recovery",
            Operation::RecoverAccount(_) => "recover_account",
            Operation::ChangeRecoveryAccount(_) => "change_recovery_account",
            Operation::ResetAccount(_) => "reset_account",
            Operation::SetResetAccount(_) => "set_reset_account",
            Operation::DeclineVotingRights(_) => "decline_voting_rights",
            Operation::ClaimRewardBalance(_) => "claim_reward_balance",
            Operation::ClaimRewardBalance2(_) => "claim_reward_balance2",
            Operation::Custom(_) => "custom",
            Operation::CustomJson(_) => "custom_json",
            Operation::CustomBinary(_) => "custom_binary",
            Operation::Pow(_) => "pow",
            Operation::Pow2(_) => "pow2",
            Operation::ReportOverProduction(_) => "report_over_production",
        }
    }
}

impl Validate for Operation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        match self {
            // ========== Content ==========
            Operation::Vote(op) => op.validate(config),
            Operation::Comment(op) => op.validate(config),
            Operation::CommentOptions(op) => op.validate(config),
            Operation::DeleteComment(op) => op.validate(config),

            // ========== Transfers ==========
            Operation::Transfer(op) => op.validate(config),
            Operation::TransferToSavings(op) => op.validate(config),
            Operation::TransferFromSavings(op) => op.validate(config),
            Operation::CancelTransferFromSavings(op) => op.validate(config),
            Operation::Convert(op) => op.validate(config),

            // ========== Staking ==========
            Operation::TransferToVesting(op) => op.validate(config),
            Operation::WithdrawVesting(op) => op.validate(config),
            Operation::SetWithdrawVestingRoute(op) => op.validate(config),
            Operation::DelegateVestingShares(op) => op.validate(config),

            // ========== Accounts ==========
            Operation::AccountCreate(op) => op.validate(config),
            Operation::AccountCreateWithDelegation(op) => op.validate(config),
            Operation::AccountUpdate(op) => op.validate(config),
            Operation::ClaimAccount(op) => op.validate(config),
            Operation::CreateClaimedAccount(op) => op.validate(config),

            // ========== Witnesses ==========
            Operation::WitnessUpdate(op) => op.validate(config),
            Operation::WitnessSetProperties(op) => op.validate(config),
            Operation::AccountWitnessVote(op) => op.validate(config),
            Operation::AccountWitnessProxy(op) => op.validate(config),
            Operation::FeedPublish(op) => op.validate(config),

            // ========== Market ==========
            Operation::LimitOrderCreate(op) => op.validate(config),
            Operation::LimitOrderCreate2(op) => op.validate(config),
            Operation::LimitOrderCancel(op) => op.validate(config),

            // ========== Escrow ==========
            Operation::EscrowTransfer(op) => op.validate(config),
            Operation::EscrowApprove(op) => op.validate(config),
            Operation::EscrowDispute(op) => op.validate(config),
            Operation::EscrowRelease(op) => op.validate(config),

            // ========== Recovery ==========
            Operation::RequestAccountRecovery(op) => op.validate(config),
            Operation::RecoverAccount(op) => op.validate(config),
            Operation::ChangeRecoveryAccount(op) => op.validate(config),
            Operation::ResetAccount(op) => op.validate(config),
            Operation::SetResetAccount(op) => op.validate(config),
            Operation::DeclineVotingRights(op) => op.validate(config),

            // ========== Rewards ==========
            Operation::ClaimRewardBalance(op) => op.validate(config),
            Operation::ClaimRewardBalance2(op) => op.validate(config),

            // ========== Custom ==========
            Operation::Custom(op) => op.validate(config),
            Operation::CustomJson(op) => op.validate(config),
            Operation::CustomBinary(op) => op.validate(config),

            // ========== Mining ==========
            Operation::Pow(op) => op.validate(config),
            Operation::Pow2(op) => op.validate(config),
            Operation::ReportOverProduction(op) => op.validate(config),
        }
    }
}

/// Validate one operation, logging the outcome
///
/// This is the entry point for transaction acceptance and block application.
/// The result depends only on `op` and `config`.
pub fn validate_operation(op: &Operation, config: &ProtocolConfig) -> Result<()> {
    let result = op.validate(config);
    match &result {
        Ok(()) => trace!(operation = op.name(), "Operation is well-formed"),
        Err(err) => debug!(
            operation = op.name(),
            category = %err.category(),
            error = %err,
            "Rejected operation"
        ),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::{Text, ValidationError};
    use strata_testkit::{liquid, test_config};

    #[test]
    fn test_dispatch_reaches_variant_validator() {
        let config = test_config();
        let op = Operation::Transfer(TransferOperation {
            from: "alice".into(),
            to: "bob".into(),
            amount: liquid(0),
            memo: Text::default(),
        });
        assert_eq!(op.name(), "transfer");
        assert!(matches!(
            validate_operation(&op, &config),
            Err(ValidationError::Range { .. })
        ));
    }

    #[test]
    fn test_names_are_distinct() {
        let ops = [
            Operation::DeclineVotingRights(DeclineVotingRightsOperation {
                account: "alice".into(),
                decline: true,
            }),
            Operation::LimitOrderCancel(LimitOrderCancelOperation {
                owner: "alice".into(),
                order_id: 1,
            }),
        ];
        assert_ne!(ops[0].name(), ops[1].name());
        for op in &ops {
            assert!(validate_operation(op, &test_config()).is_ok());
        }
    }
}
