//! Cross-subsystem integration flows.

pub mod issuance;
pub mod transfers;
pub mod verification;

#[cfg(test)]
pub(crate) mod fixtures {
    use pc_04_consensus::FixedVotes;
    use pi_node::{Collaborators, NodeConfig, PiNode};
    use std::sync::Arc;
    use std::time::Duration;

    /// Config with short delays so paused-clock tests stay cheap.
    pub fn fast_config() -> NodeConfig {
        let mut config = NodeConfig::default();
        config.consensus = config.consensus.with_fixed_delay(Duration::from_millis(10));
        config.broadcast.latency = Duration::from_millis(10);
        config
    }

    pub fn node() -> PiNode {
        PiNode::new(fast_config()).unwrap()
    }

    pub fn node_with_votes(votes: Vec<bool>) -> PiNode {
        let config = fast_config();
        let mut collaborators = Collaborators::simulated(&config);
        collaborators.votes = Arc::new(FixedVotes::new(votes));
        PiNode::with_collaborators(config, collaborators).unwrap()
    }
}
