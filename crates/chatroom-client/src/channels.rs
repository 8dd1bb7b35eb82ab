//! Channel list view state and selection rules.

use tracing::debug;

use chatroom_shared::constants::KEY_LAST_CHANNEL;
use chatroom_shared::{ChannelId, ValidationError};
use chatroom_store::Channel;

use crate::error::Result;
use crate::local_storage::LocalStorage;

/// Trim a channel name, rejecting blank ones.
pub fn validate_channel_name(name: &str) -> std::result::Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyChannelName);
    }
    Ok(name.to_string())
}

/// Read-through cache of the channel collection plus the current selection.
#[derive(Debug, Default)]
pub struct ChannelDirectory {
    channels: Vec<Channel>,
    selected: Option<ChannelId>,
}

impl ChannelDirectory {
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn selected(&self) -> Option<ChannelId> {
        self.selected
    }

    pub fn selected_channel(&self) -> Option<&Channel> {
        let id = self.selected?;
        self.find(id)
    }

    pub fn find(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    /// Replace the list with a fresh snapshot and re-apply the selection
    /// rules. Returns `true` when the selection changed.
    pub fn apply_snapshot(
        &mut self,
        channels: Vec<Channel>,
        signed_in: bool,
        storage: &LocalStorage,
    ) -> bool {
        let before = self.selected;
        self.channels = channels;

        if let Some(id) = self.selected {
            if self.find(id).is_none() {
                debug!(channel_id = %id, "Selected channel vanished");
                self.selected = None;
            }
        }
        if self.selected.is_none() && signed_in {
            self.selected = self.restore_target(storage);
        }

        self.selected != before
    }

    /// Last used channel if it still exists, else the oldest one.
    fn restore_target(&self, storage: &LocalStorage) -> Option<ChannelId> {
        let remembered = storage
            .get(KEY_LAST_CHANNEL)
            .and_then(|s| s.parse::<ChannelId>().ok())
            .filter(|id| self.find(*id).is_some());

        remembered.or_else(|| self.channels.first().map(|c| c.id))
    }

    /// Select a listed channel and remember it. Returns `Ok(false)` when the
    /// id is unknown or already selected.
    pub fn select(&mut self, id: ChannelId, storage: &mut LocalStorage) -> Result<bool> {
        if self.find(id).is_none() || self.selected == Some(id) {
            return Ok(false);
        }
        self.selected = Some(id);
        storage.set(KEY_LAST_CHANNEL, &id.to_string())?;
        Ok(true)
    }

    /// Forget the selection (sign-out). The stored id is kept for next time.
    pub fn clear_selection(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Resolve a channel by name (case-insensitive) or by id string.
    pub fn lookup(&self, key: &str) -> Option<&Channel> {
        let key = key.trim().trim_start_matches('#');
        if let Ok(id) = key.parse::<ChannelId>() {
            return self.find(id);
        }
        self.channels
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn channels(names: &[&str]) -> Vec<Channel> {
        let start = Utc::now();
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Channel {
                id: ChannelId::new(),
                name: name.to_string(),
                description: String::new(),
                created_at: start + Duration::seconds(i as i64),
            })
            .collect()
    }

    #[test]
    fn test_name_validation() {
        assert_eq!(validate_channel_name("  general "), Ok("general".to_string()));
        assert_eq!(
            validate_channel_name(" \t "),
            Err(ValidationError::EmptyChannelName)
        );
    }

    #[test]
    fn test_first_snapshot_falls_back_to_first_channel() {
        let storage = LocalStorage::in_memory();
        let list = channels(&["general", "random"]);
        let mut dir = ChannelDirectory::default();

        assert!(dir.apply_snapshot(list.clone(), true, &storage));
        assert_eq!(dir.selected(), Some(list[0].id));
    }

    #[test]
    fn test_restores_remembered_channel() {
        let mut storage = LocalStorage::in_memory();
        let list = channels(&["general", "random"]);
        storage.set(KEY_LAST_CHANNEL, &list[1].id.to_string()).unwrap();

        let mut dir = ChannelDirectory::default();
        dir.apply_snapshot(list.clone(), true, &storage);
        assert_eq!(dir.selected_channel().unwrap().name, "random");
    }

    #[test]
    fn test_no_restore_when_signed_out_or_empty() {
        let storage = LocalStorage::in_memory();
        let mut dir = ChannelDirectory::default();

        assert!(!dir.apply_snapshot(channels(&["general"]), false, &storage));
        assert!(!dir.apply_snapshot(Vec::new(), true, &storage));
        assert!(dir.selected().is_none());
    }

    #[test]
    fn test_selection_survives_updates() {
        let mut storage = LocalStorage::in_memory();
        let mut list = channels(&["general", "random"]);
        let mut dir = ChannelDirectory::default();
        dir.apply_snapshot(list.clone(), true, &storage);
        dir.select(list[1].id, &mut storage).unwrap();

        list.extend(channels(&["new"]));
        assert!(!dir.apply_snapshot(list.clone(), true, &storage));
        assert_eq!(dir.selected(), Some(list[1].id));
    }

    #[test]
    fn test_vanished_selection_is_restored_again() {
        let mut storage = LocalStorage::in_memory();
        let list = channels(&["general", "random"]);
        let mut dir = ChannelDirectory::default();
        dir.apply_snapshot(list.clone(), true, &storage);
        dir.select(list[1].id, &mut storage).unwrap();

        assert!(dir.apply_snapshot(vec![list[0].clone()], true, &storage));
        assert_eq!(dir.selected(), Some(list[0].id));
    }

    #[test]
    fn test_select_persists_and_ignores_unknown() {
        let mut storage = LocalStorage::in_memory();
        let list = channels(&["general", "random"]);
        let mut dir = ChannelDirectory::default();
        dir.apply_snapshot(list.clone(), false, &storage);

        assert!(dir.select(list[1].id, &mut storage).unwrap());
        assert_eq!(storage.get(KEY_LAST_CHANNEL), Some(list[1].id.to_string().as_str()));
        assert!(!dir.select(list[1].id, &mut storage).unwrap());
        assert!(!dir.select(ChannelId::new(), &mut storage).unwrap());
    }

    #[test]
    fn test_lookup_by_name_or_id() {
        let storage = LocalStorage::in_memory();
        let list = channels(&["General"]);
        let mut dir = ChannelDirectory::default();
        dir.apply_snapshot(list.clone(), false, &storage);

        assert_eq!(dir.lookup("#general").unwrap().id, list[0].id);
        assert_eq!(dir.lookup(&list[0].id.to_string()).unwrap().name, "General");
        assert!(dir.lookup("missing").is_none());
    }
}
