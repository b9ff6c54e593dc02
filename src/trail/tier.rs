//! Explorer tiers — qualitative labels for how much of the catalog is visited.
//!
//! Thresholds scale with catalog size. For the 8-location campus catalog the
//! ladder is 0 / 1 / 3 / 5 / 8. Intermediate rungs that would collide on a
//! small catalog are dropped; "Master Explorer" always sits at the catalog size.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    NewExplorer,
    CuriousTiger,
    CampusNavigator,
    TrailBlazer,
    MasterExplorer,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::NewExplorer => "New Explorer",
            Tier::CuriousTiger => "Curious Tiger",
            Tier::CampusNavigator => "Campus Navigator",
            Tier::TrailBlazer => "Trail Blazer",
            Tier::MasterExplorer => "Master Explorer",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The next tier to unlock and how many more visits it takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub threshold: usize,
    pub tier: Tier,
    /// 0 once every rung is cleared.
    pub remaining: usize,
}

/// A badge unlocked at a visit count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub title: &'static str,
    pub description: String,
    pub threshold: usize,
    pub unlocked: bool,
}

/// Ordered `(threshold, tier)` rungs for one catalog size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierLadder {
    rungs: Vec<(usize, Tier)>,
}

impl TierLadder {
    pub fn for_catalog_size(size: usize) -> Self {
        let intermediate = [
            (1, Tier::CuriousTiger),
            ((size * 3).div_ceil(8), Tier::CampusNavigator),
            ((size * 5).div_ceil(8), Tier::TrailBlazer),
        ];

        let mut rungs = vec![(0, Tier::NewExplorer)];
        for (threshold, tier) in intermediate {
            let prev = rungs.last().map(|&(t, _)| t).unwrap_or(0);
            if threshold > prev && threshold < size {
                rungs.push((threshold, tier));
            }
        }
        if size > 0 {
            rungs.push((size, Tier::MasterExplorer));
        }
        Self { rungs }
    }

    pub fn rungs(&self) -> &[(usize, Tier)] {
        &self.rungs
    }

    /// Highest tier whose threshold is at or below `count`.
    pub fn tier_for(&self, count: usize) -> Tier {
        self.rungs
            .iter()
            .rev()
            .find(|&&(threshold, _)| threshold <= count)
            .map(|&(_, tier)| tier)
            .unwrap_or(Tier::NewExplorer)
    }

    /// Smallest threshold strictly above `count`, or the final rung with
    /// nothing remaining when all are cleared.
    pub fn next_milestone(&self, count: usize) -> Milestone {
        if let Some(&(threshold, tier)) = self.rungs.iter().find(|&&(t, _)| t > count) {
            return Milestone {
                threshold,
                tier,
                remaining: threshold - count,
            };
        }
        let (threshold, tier) = self
            .rungs
            .last()
            .copied()
            .unwrap_or((0, Tier::NewExplorer));
        Milestone {
            threshold,
            tier,
            remaining: 0,
        }
    }

    fn threshold_of(&self, tier: Tier) -> Option<usize> {
        self.rungs
            .iter()
            .find(|&&(_, t)| t == tier)
            .map(|&(threshold, _)| threshold)
    }

    pub fn achievements(&self, count: usize) -> Vec<Achievement> {
        let mut out = Vec::with_capacity(4);
        let mut push = |title: &'static str, description: String, threshold: usize| {
            out.push(Achievement {
                title,
                description,
                threshold,
                unlocked: count >= threshold,
            });
        };

        if let Some(t) = self.threshold_of(Tier::CuriousTiger) {
            push("First Steps", "Visit your first location".to_string(), t);
        }
        if let Some(t) = self.threshold_of(Tier::CampusNavigator) {
            push("Getting Warmed Up", format!("Visit {} locations", t), t);
        }
        if let Some(t) = self.threshold_of(Tier::TrailBlazer) {
            push("Halfway There", format!("Visit {} locations", t), t);
        }
        if let Some(t) = self.threshold_of(Tier::MasterExplorer) {
            push("Master Explorer", "Visit all locations".to_string(), t);
        }
        out
    }
}
