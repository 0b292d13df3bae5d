//! Posts, comments and votes

use super::checks::require_percent;
use super::Validate;
use crate::extensions::CommentOptionsExtension;
use serde::{Deserialize, Serialize};
use strata_core::{
    ensure, require_json, require_utf8, validate_account_name, validate_optional_account_name,
    validate_permlink, AccountName, Asset, ProtocolConfig, Result, Symbol, Text, ValidationError,
};

/// Publish or edit a post or reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentOperation {
    /// Author replied to; empty for a root post
    pub parent_author: AccountName,
    /// Permlink replied to, or the category of a root post
    pub parent_permlink: String,
    /// Author
    pub author: AccountName,
    /// Permlink of this comment
    pub permlink: String,
    /// Title
    pub title: Text,
    /// Body
    pub body: Text,
    /// Free-form JSON metadata
    pub json_metadata: Text,
}

impl Validate for CommentOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        ensure!(
            self.title.len() < config.max_comment_title_size,
            ValidationError::range("title", "title larger than size limit")
        );
        require_utf8("title", self.title.as_bytes())?;
        ensure!(
            !self.body.is_empty(),
            ValidationError::range("body", "body is empty")
        );
        require_utf8("body", self.body.as_bytes())?;

        validate_optional_account_name("parent_author", &self.parent_author, config)?;
        validate_account_name("author", &self.author, config)?;
        validate_permlink("parent_permlink", &self.parent_permlink, config)?;
        validate_permlink("permlink", &self.permlink, config)?;

        if !self.json_metadata.is_empty() {
            require_json("json_metadata", self.json_metadata.as_bytes())?;
        }
        Ok(())
    }
}

/// Payout terms of a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentOptionsOperation {
    /// Author
    pub author: AccountName,
    /// Permlink
    pub permlink: String,
    /// Payout cap, in the pegged token
    pub max_accepted_payout: Asset,
    /// Share of the payout taken in the pegged token
    pub percent_pegged: u16,
    /// Whether votes are accepted
    pub allow_votes: bool,
    /// Whether curators are rewarded
    pub allow_curation_rewards: bool,
    /// Beneficiaries and other side data
    pub extensions: Vec<CommentOptionsExtension>,
}

impl Validate for CommentOptionsOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("author", &self.author, config)?;
        require_percent("percent_pegged", self.percent_pegged, config)?;
        self.max_accepted_payout
            .require_symbol("max_accepted_payout", Symbol::Pegged)?;
        ensure!(
            self.max_accepted_payout.amount >= 0,
            ValidationError::range("max_accepted_payout", "cannot accept less than 0 payout")
        );
        validate_permlink("permlink", &self.permlink, config)?;
        for extension in &self.extensions {
            extension.validate(config)?;
        }
        Ok(())
    }
}

/// Remove a comment that has no replies or net votes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCommentOperation {
    /// Author
    pub author: AccountName,
    /// Permlink
    pub permlink: String,
}

impl Validate for DeleteCommentOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_permlink("permlink", &self.permlink, config)?;
        validate_account_name("author", &self.author, config)
    }
}

/// Up- or down-vote a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOperation {
    /// Voting account
    pub voter: AccountName,
    /// Comment author
    pub author: AccountName,
    /// Comment permlink
    pub permlink: String,
    /// Signed weight in hundredths of a percent; negative flags
    pub weight: i16,
}

impl Validate for VoteOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("voter", &self.voter, config)?;
        validate_account_name("author", &self.author, config)?;
        ensure!(
            i32::from(self.weight).abs() <= i32::from(config.percent_100),
            ValidationError::range("weight", "weight is not a valid percentage")
        );
        validate_permlink("permlink", &self.permlink, config)
    }
}
