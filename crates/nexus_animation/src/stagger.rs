//! Stagger scheduling for lists of items
//!
//! Items animate in succession: item `i` starts `base_delay + rank(i) *
//! interval` after the group starts, where `rank` depends on the order.

use serde::{Deserialize, Serialize};

/// Order in which a group of items is staggered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerOrder {
    /// First to last
    #[default]
    Forward,
    /// Last to first
    Reverse,
    /// Everything at the base delay
    Uniform,
}

/// A per-item delay schedule
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerConfig {
    pub base_delay_ms: u32,
    pub interval_ms: u32,
    pub order: StaggerOrder,
}

impl StaggerConfig {
    pub fn new(base_delay_ms: u32, interval_ms: u32) -> Self {
        Self {
            base_delay_ms,
            interval_ms,
            order: StaggerOrder::Forward,
        }
    }

    pub fn uniform(delay_ms: u32) -> Self {
        Self {
            base_delay_ms: delay_ms,
            interval_ms: 0,
            order: StaggerOrder::Uniform,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.order = StaggerOrder::Reverse;
        self
    }

    /// Delay for item `index` of `total`
    pub fn delay_for_index(&self, index: usize, total: usize) -> u32 {
        let rank = match self.order {
            StaggerOrder::Forward => index,
            StaggerOrder::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerOrder::Uniform => 0,
        };
        let rank = u32::try_from(rank).unwrap_or(u32::MAX);
        self.base_delay_ms
            .saturating_add(self.interval_ms.saturating_mul(rank))
    }

    /// Delays for a whole group, in item order
    pub fn slots(&self, total: usize) -> Vec<StaggerSlot> {
        (0..total)
            .map(|index| StaggerSlot {
                index,
                delay_ms: self.delay_for_index(index, total),
            })
            .collect()
    }
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self::new(0, 100)
    }
}

/// Position and delay of one item in a staggered group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StaggerSlot {
    pub index: usize,
    pub delay_ms: u32,
}
