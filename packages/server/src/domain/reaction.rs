//! Reaction Aggregator: per-message mapping of symbol to reacting identities.

use std::collections::BTreeMap;

use super::{
    message_log::MessageLog,
    value_object::{Identity, MessageId, ReactionSymbol},
};

/// Reactions attached to a single message.
///
/// Reactors for a symbol keep their first-reaction order for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reactions(BTreeMap<ReactionSymbol, Vec<Identity>>);

impl Reactions {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add `identity` under `symbol`. Returns `false` if it was already there.
    pub fn add(&mut self, symbol: ReactionSymbol, identity: Identity) -> bool {
        let reactors = self.0.entry(symbol).or_default();
        if reactors.contains(&identity) {
            return false;
        }
        reactors.push(identity);
        true
    }

    pub fn reactors(&self, symbol: &ReactionSymbol) -> &[Identity] {
        self.0.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ReactionSymbol, &Vec<Identity>)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of applying a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// The reactor set changed and should be announced.
    Added,
    /// The identity had already reacted with this symbol.
    AlreadyPresent,
    /// No logged message has this id (evicted, private, or unknown).
    MessageNotFound,
}

/// Applies reactions to messages held in the log.
pub struct ReactionAggregator;

impl ReactionAggregator {
    pub fn react(
        log: &mut MessageLog,
        message_id: MessageId,
        symbol: ReactionSymbol,
        identity: Identity,
    ) -> ReactionOutcome {
        match log.find_mut(message_id) {
            Some(message) => {
                if message.reactions.add(symbol, identity) {
                    ReactionOutcome::Added
                } else {
                    ReactionOutcome::AlreadyPresent
                }
            }
            None => ReactionOutcome::MessageNotFound,
        }
    }
}
