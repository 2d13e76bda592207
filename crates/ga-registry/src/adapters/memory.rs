//! # In-Memory Store
//!
//! One `RwLock` over the whole registry state. Every check-and-set takes the
//! write lock once, which realizes the exactly-one-winner rule for
//! concurrent inserts of the same key.

use crate::domain::entities::{Channel, GithubSide, Member, OnboardMessage, TeeSide};
use crate::domain::errors::RegistryError;
use crate::ports::outbound::{AllowListStore, ChannelStore, GuardStore, MemberStore};
use shared_types::{ChannelId, CodeId, Hash, MemberId};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

#[derive(Default)]
struct State {
    allowed_codes: HashSet<CodeId>,
    members: HashMap<MemberId, Member>,
    inboxes: HashMap<MemberId, Vec<OnboardMessage>>,
    channels: HashMap<ChannelId, Channel>,
    claims: HashSet<Hash>,
    cooldowns: HashMap<Hash, u64>,
}

/// In-memory implementation of all store ports.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    /// Fresh, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AllowListStore for InMemoryStore {
    fn allow_code(&self, code_id: CodeId) -> Result<(), RegistryError> {
        let mut state = self.state.write().map_err(|_| RegistryError::StorePoisoned)?;
        state.allowed_codes.insert(code_id);
        Ok(())
    }

    fn revoke_code(&self, code_id: &CodeId) -> Result<(), RegistryError> {
        let mut state = self.state.write().map_err(|_| RegistryError::StorePoisoned)?;
        state.allowed_codes.remove(code_id);
        Ok(())
    }

    fn is_code_allowed(&self, code_id: &CodeId) -> Result<bool, RegistryError> {
        let state = self.state.read().map_err(|_| RegistryError::StorePoisoned)?;
        Ok(state.allowed_codes.contains(code_id))
    }
}

impl MemberStore for InMemoryStore {
    fn insert_member(&self, member: Member) -> Result<(), RegistryError> {
        let mut state = self.state.write().map_err(|_| RegistryError::StorePoisoned)?;
        if state.members.contains_key(&member.member_id) {
            return Err(RegistryError::AlreadyRegistered);
        }
        state.members.insert(member.member_id, member);
        Ok(())
    }

    fn get_member(&self, id: &MemberId) -> Result<Option<Member>, RegistryError> {
        let state = self.state.read().map_err(|_| RegistryError::StorePoisoned)?;
        Ok(state.members.get(id).cloned())
    }

    fn is_member(&self, id: &MemberId) -> Result<bool, RegistryError> {
        let state = self.state.read().map_err(|_| RegistryError::StorePoisoned)?;
        Ok(state.members.contains_key(id))
    }

    fn append_onboarding(&self, to: &MemberId, msg: OnboardMessage) -> Result<(), RegistryError> {
        let mut state = self.state.write().map_err(|_| RegistryError::StorePoisoned)?;
        state.inboxes.entry(*to).or_default().push(msg);
        Ok(())
    }

    fn get_onboarding(&self, id: &MemberId) -> Result<Vec<OnboardMessage>, RegistryError> {
        let state = self.state.read().map_err(|_| RegistryError::StorePoisoned)?;
        Ok(state.inboxes.get(id).cloned().unwrap_or_default())
    }
}

impl ChannelStore for InMemoryStore {
    fn insert_channel(&self, channel: Channel) -> Result<(), RegistryError> {
        let mut state = self.state.write().map_err(|_| RegistryError::StorePoisoned)?;
        if state.channels.contains_key(&channel.channel_id) {
            return Err(RegistryError::ChannelExists);
        }
        state.channels.insert(channel.channel_id.clone(), channel);
        Ok(())
    }

    fn get_channel(&self, id: &ChannelId) -> Result<Option<Channel>, RegistryError> {
        let state = self.state.read().map_err(|_| RegistryError::StorePoisoned)?;
        Ok(state.channels.get(id).cloned())
    }

    fn set_github_side(&self, id: &ChannelId, side: GithubSide) -> Result<(), RegistryError> {
        let mut state = self.state.write().map_err(|_| RegistryError::StorePoisoned)?;
        let channel = state
            .channels
            .get_mut(id)
            .ok_or(RegistryError::ChannelNotFound)?;
        channel.set_github(side)
    }

    fn set_tee_side(&self, id: &ChannelId, side: TeeSide) -> Result<(), RegistryError> {
        let mut state = self.state.write().map_err(|_| RegistryError::StorePoisoned)?;
        let channel = state
            .channels
            .get_mut(id)
            .ok_or(RegistryError::ChannelNotFound)?;
        channel.set_tee(side)
    }
}

impl GuardStore for InMemoryStore {
    fn claim(&self, key: Hash) -> Result<(), RegistryError> {
        let mut state = self.state.write().map_err(|_| RegistryError::StorePoisoned)?;
        if !state.claims.insert(key) {
            return Err(RegistryError::AlreadyClaimed);
        }
        Ok(())
    }

    fn is_claimed(&self, key: &Hash) -> Result<bool, RegistryError> {
        let state = self.state.read().map_err(|_| RegistryError::StorePoisoned)?;
        Ok(state.claims.contains(key))
    }

    fn cooldown_until(&self, key: &Hash) -> Result<Option<u64>, RegistryError> {
        let state = self.state.read().map_err(|_| RegistryError::StorePoisoned)?;
        Ok(state.cooldowns.get(key).copied())
    }

    fn advance_cooldown(&self, key: Hash, until: u64) -> Result<(), RegistryError> {
        let mut state = self.state.write().map_err(|_| RegistryError::StorePoisoned)?;
        let entry = state.cooldowns.entry(key).or_insert(0);
        if until > *entry {
            *entry = until;
        }
        Ok(())
    }
}
