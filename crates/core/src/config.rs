//! Configuration

use std::env;

use hubble_bls::{BlsError, Domain, Wallet};
use hubble_smt::NodeStore;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{account_tree::AccountTree, error::AccountTreeError};

/// Depth of the registry tree deployed on chain
pub const DEFAULT_ACCOUNT_TREE_DEPTH: u8 = 31;

const ACCOUNT_TREE_DEPTH_VAR: &str = "HUBBLE_ACCOUNT_TREE_DEPTH";
const SIGNATURES_DOMAIN_VAR: &str = "HUBBLE_SIGNATURES_DOMAIN";

/// Commitment layer configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Depth of the account tree
    pub account_tree_depth: u8,
    /// Domain every signature is bound to
    pub signatures_domain: Domain,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account_tree_depth: DEFAULT_ACCOUNT_TREE_DEPTH,
            signatures_domain: Domain::default(),
        }
    }
}

impl Config {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from any key lookup. Malformed values fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let account_tree_depth = lookup(ACCOUNT_TREE_DEPTH_VAR)
            .and_then(|raw| match raw.trim().parse::<u8>() {
                Ok(depth) => Some(depth),
                Err(err) => {
                    warn!(
                        %err,
                        var = ACCOUNT_TREE_DEPTH_VAR,
                        value = %raw,
                        "invalid config value, using default"
                    );
                    None
                }
            })
            .unwrap_or(defaults.account_tree_depth);

        let signatures_domain = lookup(SIGNATURES_DOMAIN_VAR)
            .and_then(|raw| match raw.trim().parse::<Domain>() {
                Ok(domain) => Some(domain),
                Err(err) => {
                    warn!(
                        %err,
                        var = SIGNATURES_DOMAIN_VAR,
                        value = %raw,
                        "invalid config value, using default"
                    );
                    None
                }
            })
            .unwrap_or(defaults.signatures_domain);

        Self { account_tree_depth, signatures_domain }
    }

    /// Empty account tree of the configured depth over `store`
    pub fn account_tree<S: NodeStore>(&self, store: S) -> Result<AccountTree<S>, AccountTreeError> {
        AccountTree::new(store, self.account_tree_depth)
    }

    /// Wallet signing in the configured domain
    pub fn wallet_from_secret(&self, secret: &[u8]) -> Result<Wallet, BlsError> {
        Wallet::from_secret(secret, self.signatures_domain)
    }
}
