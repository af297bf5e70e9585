use crate::core::models::Group;
use crate::stores::Revision;
use log::debug;
use tokio::sync::watch;

/// Last-known list of groups as reported by the Gateway.
#[derive(Debug, Default)]
pub struct GroupStore {
    groups: Vec<Group>,
    revision: Revision,
}

impl GroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn total_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn get_group_by_id(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn set_groups(&mut self, groups: Vec<Group>) {
        debug!("Replacing {} cached groups with {}", self.groups.len(), groups.len());
        self.groups = groups;
        self.revision.bump();
    }

    pub fn add_group(&mut self, group: Group) {
        self.groups.push(group);
        self.revision.bump();
    }

    /// Returns whether a group was removed.
    pub fn remove_group(&mut self, id: &str) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| g.id != id);
        let removed = self.groups.len() != before;
        if removed {
            self.revision.bump();
        }
        removed
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.revision.current()
    }
}
