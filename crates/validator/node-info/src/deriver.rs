//! The [`NodeDeriver`].

use crate::{DeriverConfig, LogGroup, NodeInfo};
use alloc::{string::String, vec::Vec};
use alloy_primitives::{Address, B256};
use arb_avm::{AvmValue, DecodedExecution, DisputeNode, KeccakLogHasher, LogDecoder, LogHasher};
use tracing::{debug, info, warn};

/// Derives [`NodeInfo`]s from dispute nodes.
///
/// The deriver holds no state besides its configuration and the two capabilities it is built
/// with: a [`LogHasher`] for the log accumulator and a [`LogDecoder`] for EVM decoding. Deriving
/// only reads the node and allocates a fresh [`NodeInfo`], so a shared deriver can serve
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct NodeDeriver<H, D> {
    config: DeriverConfig,
    hasher: H,
    decoder: D,
}

impl<D> NodeDeriver<KeccakLogHasher, D>
where
    D: LogDecoder,
{
    /// Creates a deriver using the keccak log hasher.
    pub const fn with_decoder(config: DeriverConfig, decoder: D) -> Self {
        Self::new(config, KeccakLogHasher, decoder)
    }
}

impl<H, D> NodeDeriver<H, D>
where
    H: LogHasher,
    D: LogDecoder,
{
    /// Creates a new [`NodeDeriver`].
    pub const fn new(config: DeriverConfig, hasher: H, decoder: D) -> Self {
        Self { config, hasher, decoder }
    }

    /// Returns the configuration of the deriver.
    pub const fn config(&self) -> &DeriverConfig {
        &self.config
    }

    /// Returns the log hasher of the deriver.
    pub const fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Derives the [`NodeInfo`] of `node` for the configured chain.
    ///
    /// See [`NodeDeriver::derive_with_chain`].
    pub fn derive<N: DisputeNode>(&self, node: &N) -> NodeInfo {
        self.derive_with_chain(node, self.config.chain_address)
    }

    /// Derives the [`NodeInfo`] of `node`, decoding its logs in the context of the rollup chain
    /// at `chain_address`.
    ///
    /// This function:
    /// - Copies the node's identity.
    /// - Stops there unless the node resulted from a valid assertion.
    /// - Copies the raw logs and messages of the assertion.
    /// - Hashes every raw log and folds the hashes into the log accumulator.
    /// - Decodes every raw log into a [`LogGroup`]. Raw logs that fail to decode are logged and
    ///   skipped; the remaining groups keep the index of the raw log they came from.
    pub fn derive_with_chain<N: DisputeNode>(&self, node: &N, chain_address: Address) -> NodeInfo {
        let mut info = NodeInfo::new(node.hash(), node.depth(), node.assertion_tx_hash());

        let link_type = node.link_type();
        if !link_type.is_valid() {
            debug!(
                target: "node_deriver",
                node_hash = %info.node_hash,
                node_height = info.node_height,
                ?link_type,
                "Derived node without execution output",
            );
            return info;
        }

        let Some(assertion) = node.assertion() else {
            warn!(
                target: "node_deriver",
                node_hash = %info.node_hash,
                node_height = info.node_height,
                "Valid node is missing its assertion",
            );
            return info;
        };

        info.raw_messages = assertion.out_msgs.clone();
        info.raw_logs = assertion.logs.clone();

        let (val_hashes, acc_hashes) = self.hash_logs(&info.raw_logs);
        info.log_val_hashes = val_hashes;
        info.log_acc_hashes = acc_hashes;

        let (groups, tx_hashes) = self.decode_logs(&info.raw_logs, info.node_hash, chain_address);
        info.evm_tx_groups = groups;
        info.evm_tx_hashes = tx_hashes;

        debug!(
            target: "node_deriver",
            node_hash = %info.node_hash,
            node_height = info.node_height,
            num_raw_logs = info.raw_logs.len(),
            num_messages = info.raw_messages.len(),
            num_decoded = info.evm_tx_groups.len(),
            "Derived node",
        );
        info
    }

    /// Returns the value hash and the running accumulator after every log.
    fn hash_logs(&self, logs: &[AvmValue]) -> (Vec<B256>, Vec<B256>) {
        let mut val_hashes = Vec::with_capacity(logs.len());
        let mut acc_hashes = Vec::with_capacity(logs.len());

        let mut acc = B256::ZERO;
        for log in logs {
            let val_hash = self.hasher.value_hash(log);
            acc = self.hasher.accumulate(acc, val_hash);
            val_hashes.push(val_hash);
            acc_hashes.push(acc);
        }

        (val_hashes, acc_hashes)
    }

    /// Decodes every raw log, skipping the ones that fail to decode.
    fn decode_logs(
        &self,
        logs: &[AvmValue],
        node_hash: B256,
        chain_address: Address,
    ) -> (Vec<LogGroup>, Vec<B256>) {
        let mut groups = Vec::with_capacity(logs.len());
        let mut tx_hashes = Vec::with_capacity(logs.len());

        for (tx_index, raw_log) in (0u64..).zip(logs) {
            let execution = match self.decoder.decode(raw_log, chain_address) {
                Ok(execution) => execution,
                Err(err) => {
                    warn!(
                        target: "node_deriver",
                        %node_hash,
                        tx_index,
                        %err,
                        "VM produced invalid EVM result",
                    );
                    continue;
                }
            };

            let tx_hash = execution.message().tx_hash();
            if let DecodedExecution::Revert { payload, .. } = &execution {
                info!(
                    target: "node_deriver",
                    %node_hash,
                    tx_index,
                    %tx_hash,
                    ?payload,
                    reason = %String::from_utf8_lossy(payload),
                    "EVM execution reverted",
                );
            }

            groups.push(LogGroup { logs: execution.into_logs(), tx_index, tx_hash });
            tx_hashes.push(tx_hash);
        }

        groups.shrink_to_fit();
        tx_hashes.shrink_to_fit();
        (groups, tx_hashes)
    }
}
