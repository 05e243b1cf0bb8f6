//! Mount generations.
//!
//! Every request is tagged with the token of the screen mount that sent it.
//! Leaving a screen bumps its generation, so a response that arrives after
//! the user moved on no longer matches and is dropped instead of writing
//! into a screen that is not showing.

use std::collections::{HashMap, HashSet};

use aquadesk_core::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Dashboard,
    Resource(ResourceKind),
    /// Background users lookup. Never shown as a tab.
    Directory,
}

impl ScreenId {
    /// Tab order
    pub const TABS: [ScreenId; 12] = [
        ScreenId::Dashboard,
        ScreenId::Resource(ResourceKind::Users),
        ScreenId::Resource(ResourceKind::Connections),
        ScreenId::Resource(ResourceKind::Bills),
        ScreenId::Resource(ResourceKind::Readings),
        ScreenId::Resource(ResourceKind::WaterSources),
        ScreenId::Resource(ResourceKind::Employees),
        ScreenId::Resource(ResourceKind::Complaints),
        ScreenId::Resource(ResourceKind::Alerts),
        ScreenId::Resource(ResourceKind::AuditLogs),
        ScreenId::Resource(ResourceKind::Customers),
        ScreenId::Resource(ResourceKind::QualityRecords),
    ];

    pub fn title(self) -> &'static str {
        match self {
            ScreenId::Dashboard => "Dashboard",
            ScreenId::Resource(kind) => kind.title(),
            ScreenId::Directory => "Directory",
        }
    }

    pub fn tab_index(self) -> Option<usize> {
        Self::TABS.iter().position(|t| *t == self)
    }

    pub fn from_tab_index(index: usize) -> Option<Self> {
        Self::TABS.get(index).copied()
    }

    /// `dashboard` or any resource path or title
    pub fn parse(name: &str) -> Option<Self> {
        if name.trim().eq_ignore_ascii_case("dashboard") {
            return Some(ScreenId::Dashboard);
        }
        name.parse::<ResourceKind>().ok().map(ScreenId::Resource)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenToken {
    pub screen: ScreenId,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct MountRegistry {
    generations: HashMap<ScreenId, u64>,
    mounted: HashSet<ScreenId>,
}

impl MountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new mount of `screen` and return its token.
    ///
    /// Mounting an already-mounted screen also starts a new generation, which
    /// orphans everything the previous mount still has in flight.
    pub fn mount(&mut self, screen: ScreenId) -> ScreenToken {
        let generation = self.bump(screen);
        self.mounted.insert(screen);
        ScreenToken { screen, generation }
    }

    pub fn unmount(&mut self, screen: ScreenId) {
        if self.mounted.remove(&screen) {
            self.bump(screen);
        }
    }

    pub fn is_mounted(&self, screen: ScreenId) -> bool {
        self.mounted.contains(&screen)
    }

    pub fn current(&self, screen: ScreenId) -> Option<ScreenToken> {
        self.is_mounted(screen).then(|| ScreenToken {
            screen,
            generation: self.generations.get(&screen).copied().unwrap_or(0),
        })
    }

    /// Whether a response carrying `token` may still be applied
    pub fn is_current(&self, token: &ScreenToken) -> bool {
        self.current(token.screen) == Some(*token)
    }

    fn bump(&mut self, screen: ScreenId) -> u64 {
        let generation = self.generations.entry(screen).or_insert(0);
        *generation += 1;
        *generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BILLS: ScreenId = ScreenId::Resource(ResourceKind::Bills);
    const USERS: ScreenId = ScreenId::Resource(ResourceKind::Users);

    #[test]
    fn test_token_is_current_while_mounted() {
        let mut mounts = MountRegistry::new();
        let token = mounts.mount(BILLS);
        assert!(mounts.is_current(&token));
        assert_eq!(mounts.current(BILLS), Some(token));
    }

    #[test]
    fn test_unmount_orphans_in_flight_tokens() {
        let mut mounts = MountRegistry::new();
        let token = mounts.mount(BILLS);
        mounts.unmount(BILLS);
        assert!(!mounts.is_current(&token));
        assert_eq!(mounts.current(BILLS), None);

        // Coming back does not revive the old token either
        let again = mounts.mount(BILLS);
        assert!(mounts.is_current(&again));
        assert!(!mounts.is_current(&token));
        assert!(again.generation > token.generation);
    }

    #[test]
    fn test_screens_are_independent() {
        let mut mounts = MountRegistry::new();
        let bills = mounts.mount(BILLS);
        let users = mounts.mount(USERS);
        mounts.unmount(USERS);
        assert!(mounts.is_current(&bills));
        assert!(!mounts.is_current(&users));
    }

    #[test]
    fn test_remount_replaces_generation() {
        let mut mounts = MountRegistry::new();
        let first = mounts.mount(ScreenId::Directory);
        let second = mounts.mount(ScreenId::Directory);
        assert!(!mounts.is_current(&first));
        assert!(mounts.is_current(&second));
    }

    #[test]
    fn test_tab_order_and_parsing() {
        assert_eq!(ScreenId::from_tab_index(0), Some(ScreenId::Dashboard));
        assert_eq!(BILLS.tab_index(), Some(3));
        assert_eq!(ScreenId::Directory.tab_index(), None);
        assert_eq!(ScreenId::parse("Dashboard"), Some(ScreenId::Dashboard));
        assert_eq!(
            ScreenId::parse("water-sources"),
            Some(ScreenId::Resource(ResourceKind::WaterSources))
        );
        assert_eq!(ScreenId::parse("reservoirs"), None);
    }
}
