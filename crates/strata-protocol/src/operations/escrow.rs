//! Three-party escrow
//!
//! An agent holds funds between a sender and a receiver. The agent must be a
//! third party, and each follow-up operation restricts which of the three
//! may act.

use super::checks::{require_non_negative, require_symbol_in};
use super::Validate;
use serde::{Deserialize, Serialize};
use strata_core::{
    ensure, validate_account_name, validate_json_metadata, AccountName, Asset, ProtocolConfig,
    Result, Symbol, Text, TimePointSec, ValidationError,
};

fn validate_parties(
    from: &str,
    to: &str,
    agent: &str,
    config: &ProtocolConfig,
) -> Result<()> {
    validate_account_name("from", from, config)?;
    validate_account_name("to", to, config)?;
    validate_account_name("agent", agent, config)
}

fn validate_amounts(verb: &str, pegged_amount: &Asset, liquid_amount: &Asset) -> Result<()> {
    require_non_negative("pegged_amount", pegged_amount)?;
    require_non_negative("liquid_amount", liquid_amount)?;
    ensure!(
        pegged_amount.amount > 0 || liquid_amount.amount > 0,
        ValidationError::range("amount", format!("escrow must {verb} a non-zero amount"))
    );
    Ok(())
}

fn validate_amount_symbols(pegged_amount: &Asset, liquid_amount: &Asset) -> Result<()> {
    pegged_amount.require_symbol("pegged_amount", Symbol::Pegged)?;
    liquid_amount.require_symbol("liquid_amount", Symbol::Liquid)
}

/// Place funds in escrow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowTransferOperation {
    /// Sender
    pub from: AccountName,
    /// Receiver
    pub to: AccountName,
    /// Escrow agent
    pub agent: AccountName,
    /// Sender-chosen escrow identifier
    pub escrow_id: u32,
    /// Pegged amount held
    pub pegged_amount: Asset,
    /// Liquid amount held
    pub liquid_amount: Asset,
    /// Agent fee
    pub fee: Asset,
    /// Receiver and agent must approve before this
    pub ratification_deadline: TimePointSec,
    /// Escrow ends at this time
    pub escrow_expiration: TimePointSec,
    /// Free-form JSON terms
    pub json_meta: Text,
}

impl Validate for EscrowTransferOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_parties(&self.from, &self.to, &self.agent, config)?;
        require_non_negative("fee", &self.fee)?;
        validate_amounts("transfer", &self.pegged_amount, &self.liquid_amount)?;
        ensure!(
            self.from != self.agent && self.to != self.agent,
            ValidationError::structural("agent must be a third party")
        );
        require_symbol_in("fee", &self.fee, &[Symbol::Liquid, Symbol::Pegged])?;
        validate_amount_symbols(&self.pegged_amount, &self.liquid_amount)?;
        ensure!(
            self.ratification_deadline < self.escrow_expiration,
            ValidationError::range(
                "ratification_deadline",
                "ratification deadline must be before escrow expiration"
            )
        );
        validate_json_metadata("json_meta", &self.json_meta)
    }
}

/// Receiver or agent ratifies the escrow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowApproveOperation {
    /// Sender
    pub from: AccountName,
    /// Receiver
    pub to: AccountName,
    /// Escrow agent
    pub agent: AccountName,
    /// Approving party
    pub who: AccountName,
    /// Escrow identifier
    pub escrow_id: u32,
    /// Approve or reject
    pub approve: bool,
}

impl Validate for EscrowApproveOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_parties(&self.from, &self.to, &self.agent, config)?;
        validate_account_name("who", &self.who, config)?;
        ensure!(
            self.who == self.to || self.who == self.agent,
            ValidationError::structural("to or agent must approve escrow")
        );
        Ok(())
    }
}

/// Sender or receiver raises a dispute, handing control to the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowDisputeOperation {
    /// Sender
    pub from: AccountName,
    /// Receiver
    pub to: AccountName,
    /// Escrow agent
    pub agent: AccountName,
    /// Disputing party
    pub who: AccountName,
    /// Escrow identifier
    pub escrow_id: u32,
}

impl Validate for EscrowDisputeOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_parties(&self.from, &self.to, &self.agent, config)?;
        validate_account_name("who", &self.who, config)?;
        ensure!(
            self.who == self.from || self.who == self.to,
            ValidationError::structural("who must be from or to")
        );
        Ok(())
    }
}

/// Release escrowed funds to one of the counterparties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowReleaseOperation {
    /// Sender
    pub from: AccountName,
    /// Receiver
    pub to: AccountName,
    /// Escrow agent
    pub agent: AccountName,
    /// Releasing party
    pub who: AccountName,
    /// Party receiving the funds
    pub receiver: AccountName,
    /// Escrow identifier
    pub escrow_id: u32,
    /// Pegged amount released
    pub pegged_amount: Asset,
    /// Liquid amount released
    pub liquid_amount: Asset,
}

impl Validate for EscrowReleaseOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_parties(&self.from, &self.to, &self.agent, config)?;
        validate_account_name("who", &self.who, config)?;
        validate_account_name("receiver", &self.receiver, config)?;
        ensure!(
            self.who == self.from || self.who == self.to || self.who == self.agent,
            ValidationError::structural("who must be from or to or agent")
        );
        ensure!(
            self.receiver == self.from || self.receiver == self.to,
            ValidationError::structural("receiver must be from or to")
        );
        validate_amounts("release", &self.pegged_amount, &self.liquid_amount)?;
        validate_amount_symbols(&self.pegged_amount, &self.liquid_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use strata_testkit::{liquid, pegged, staked, test_config};

    fn escrow() -> EscrowTransferOperation {
        EscrowTransferOperation {
            from: "buyer".into(),
            to: "seller".into(),
            agent: "arbiter".into(),
            escrow_id: 7,
            pegged_amount: pegged(0),
            liquid_amount: liquid(1_000),
            fee: pegged(10),
            ratification_deadline: 1_000,
            escrow_expiration: 2_000,
            json_meta: Text::default(),
        }
    }

    #[test]
    fn test_escrow_transfer() {
        let config = test_config();
        assert!(escrow().validate(&config).is_ok());

        let nothing = EscrowTransferOperation { liquid_amount: liquid(0), ..escrow() };
        assert_matches!(nothing.validate(&config), Err(ValidationError::Range { .. }));

        let to_agent = EscrowTransferOperation { agent: "seller".into(), ..escrow() };
        assert_matches!(to_agent.validate(&config), Err(ValidationError::Structural { .. }));

        let staked_fee = EscrowTransferOperation { fee: staked(10), ..escrow() };
        assert_matches!(staked_fee.validate(&config), Err(ValidationError::TypeMismatch { .. }));

        let swapped = EscrowTransferOperation {
            pegged_amount: liquid(5),
            liquid_amount: pegged(5),
            ..escrow()
        };
        assert_matches!(swapped.validate(&config), Err(ValidationError::TypeMismatch { .. }));

        let late = EscrowTransferOperation { ratification_deadline: 2_000, ..escrow() };
        assert_matches!(late.validate(&config), Err(ValidationError::Range { .. }));

        let bad_json = EscrowTransferOperation { json_meta: Text::from("terms"), ..escrow() };
        assert_matches!(bad_json.validate(&config), Err(ValidationError::Encoding { .. }));
    }

    #[test]
    fn test_approve_and_dispute_parties() {
        let config = test_config();
        let approve = |who: &str| EscrowApproveOperation {
            from: "buyer".into(),
            to: "seller".into(),
            agent: "arbiter".into(),
            who: who.into(),
            escrow_id: 7,
            approve: true,
        };
        assert!(approve("seller").validate(&config).is_ok());
        assert!(approve("arbiter").validate(&config).is_ok());
        assert_matches!(approve("buyer").validate(&config), Err(ValidationError::Structural { .. }));

        let dispute = |who: &str| EscrowDisputeOperation {
            from: "buyer".into(),
            to: "seller".into(),
            agent: "arbiter".into(),
            who: who.into(),
            escrow_id: 7,
        };
        assert!(dispute("buyer").validate(&config).is_ok());
        assert_matches!(dispute("arbiter").validate(&config), Err(ValidationError::Structural { .. }));
    }

    #[test]
    fn test_release() {
        let config = test_config();
        let release = EscrowReleaseOperation {
            from: "buyer".into(),
            to: "seller".into(),
            agent: "arbiter".into(),
            who: "arbiter".into(),
            receiver: "seller".into(),
            escrow_id: 7,
            pegged_amount: pegged(0),
            liquid_amount: liquid(1_000),
        };
        assert!(release.validate(&config).is_ok());

        let to_agent = EscrowReleaseOperation { receiver: "arbiter".into(), ..release.clone() };
        assert_matches!(to_agent.validate(&config), Err(ValidationError::Structural { .. }));

        let outsider = EscrowReleaseOperation { who: "mallory".into(), ..release.clone() };
        assert_matches!(outsider.validate(&config), Err(ValidationError::Structural { .. }));

        let empty = EscrowReleaseOperation { liquid_amount: liquid(0), ..release };
        assert_matches!(empty.validate(&config), Err(ValidationError::Range { .. }));
    }
}
