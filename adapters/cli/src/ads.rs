//! Advertising capability injected into the shell.
//!
//! Ads are purely presentational: nothing here feeds back into the session.

use tracing::{debug, info};

/// Format of an ad placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AdKind {
    /// Full-screen ad shown between levels.
    Interstitial,
    /// Opt-in video ad that grants a reward when watched.
    Rewarded,
}

/// Platform ad integration as seen by the shell.
pub(crate) trait AdService {
    /// Preloads the next ad; returns whether one is now ready.
    fn load_ad(&mut self) -> bool;

    /// Shows the loaded ad; returns false when nothing was ready.
    fn show_ad(&mut self, kind: AdKind) -> bool;

    /// Reports whether a rewarded ad has been watched to completion.
    fn reward_granted(&self) -> bool;
}

/// In-memory stand-in for an ad network.
#[derive(Debug, Default)]
pub(crate) struct MockAdService {
    loaded: bool,
    loads: u32,
    shown: u32,
    rewarded: bool,
}

impl MockAdService {
    pub(crate) const fn shown(&self) -> u32 {
        self.shown
    }

    pub(crate) const fn loads(&self) -> u32 {
        self.loads
    }
}

impl AdService for MockAdService {
    fn load_ad(&mut self) -> bool {
        self.loaded = true;
        self.loads = self.loads.saturating_add(1);
        debug!(loads = self.loads, "ad loaded");
        true
    }

    fn show_ad(&mut self, kind: AdKind) -> bool {
        if !self.loaded {
            debug!(?kind, "no ad ready");
            return false;
        }

        self.loaded = false;
        self.shown = self.shown.saturating_add(1);
        if kind == AdKind::Rewarded {
            self.rewarded = true;
        }
        info!(?kind, shown = self.shown, "ad shown");
        let _ = self.load_ad();
        true
    }

    fn reward_granted(&self) -> bool {
        self.rewarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showing_requires_a_loaded_ad() {
        let mut ads = MockAdService::default();
        assert!(!ads.show_ad(AdKind::Interstitial));
        assert_eq!(ads.shown(), 0);

        assert!(ads.load_ad());
        assert!(ads.show_ad(AdKind::Interstitial));
        assert_eq!(ads.shown(), 1);
        assert!(!ads.reward_granted());
    }

    #[test]
    fn showing_preloads_the_next_ad() {
        let mut ads = MockAdService::default();
        let _ = ads.load_ad();

        assert!(ads.show_ad(AdKind::Interstitial));
        assert!(ads.show_ad(AdKind::Rewarded));
        assert_eq!(ads.shown(), 2);
        assert_eq!(ads.loads(), 3);
        assert!(ads.reward_granted());
    }
}
