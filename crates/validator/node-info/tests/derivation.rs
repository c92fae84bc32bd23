//! End-to-end derivation scenarios.

use alloy_primitives::{Address, B256, Bloom, BloomInput, map::HashSet};
use arb_avm::{
    AvmValue, DisputeNodeBuilder, KeccakLogHasher, LinkType, LogHasher, MockDisputeNode,
    ScriptedDecoder, accumulate, evm_log, raw_value,
};
use arb_node_info::{DeriverConfig, NodeDeriver, NodeInfo};
use proptest::prelude::*;
use rstest::*;

const CHAIN: Address = Address::repeat_byte(0xc0);
const EMITTER: Address = Address::repeat_byte(0x0e);
const TOPIC: B256 = B256::repeat_byte(0x70);

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Three raw logs where the second one fails to decode.
#[fixture]
fn node() -> MockDisputeNode {
    DisputeNodeBuilder::new()
        .with_hash(B256::repeat_byte(0x01))
        .with_depth(4)
        .with_assertion_tx_hash(B256::repeat_byte(0x02))
        .add_log(raw_value("tx-0"))
        .add_log(raw_value("tx-1"))
        .add_log(raw_value("tx-2"))
        .add_message(raw_value("msg-0"))
        .build()
}

#[fixture]
fn decoder() -> ScriptedDecoder {
    ScriptedDecoder::new()
        .succeed(
            raw_value("tx-0"),
            B256::repeat_byte(0x10),
            vec![evm_log(EMITTER, vec![TOPIC], b"first"), evm_log(CHAIN, vec![], b"second")],
        )
        .fail(raw_value("tx-1"))
        .succeed(
            raw_value("tx-2"),
            B256::repeat_byte(0x12),
            vec![evm_log(EMITTER, vec![TOPIC, B256::ZERO], b"third")],
        )
}

fn derive(node: &MockDisputeNode, decoder: ScriptedDecoder) -> NodeInfo {
    NodeDeriver::with_decoder(DeriverConfig::new(CHAIN), decoder).derive(node)
}

#[rstest]
fn test_decode_failure_keeps_accumulator_aligned(node: MockDisputeNode, decoder: ScriptedDecoder) {
    init_tracing();
    let info = derive(&node, decoder);

    assert_eq!(info.raw_logs().len(), 3);
    assert_eq!(info.log_val_hashes().len(), 3);
    assert_eq!(info.log_acc_hashes().len(), 3);

    let tx_indices: Vec<u64> = info.evm_tx_groups().iter().map(|group| group.tx_index).collect();
    assert_eq!(tx_indices, vec![0, 2]);
    assert_eq!(info.evm_tx_hashes(), &[B256::repeat_byte(0x10), B256::repeat_byte(0x12)]);

    let tx = info.tx_info(B256::repeat_byte(0x12), 2).unwrap();
    assert!(tx.found);
    assert_eq!(tx.logs_pre_hash, info.log_acc_hashes()[1]);
    assert_eq!(tx.logs_post_hash, info.log_acc_hashes()[2]);
    assert!(tx.logs_val_hashes.is_empty());
    assert!(tx.verify(&KeccakLogHasher));

    assert_eq!(info.tx_index_of(B256::repeat_byte(0x12)), Some(2));
}

#[rstest]
fn test_derivation_is_idempotent(node: MockDisputeNode, decoder: ScriptedDecoder) {
    let first = derive(&node, decoder.clone());
    let second = derive(&node, decoder);
    assert!(first.equals(&second));
}

#[rstest]
fn test_height_difference_breaks_equality(node: MockDisputeNode, decoder: ScriptedDecoder) {
    let mut other = node.clone();
    other.depth += 1;

    let a = derive(&node, decoder.clone());
    let b = derive(&other, decoder);
    assert!(!a.equals(&b));
}

#[rstest]
#[case(LinkType::InvalidPending)]
#[case(LinkType::InvalidMessages)]
#[case(LinkType::InvalidExecution)]
fn test_non_valid_nodes_carry_identity_only(
    node: MockDisputeNode,
    decoder: ScriptedDecoder,
    #[case] link_type: LinkType,
) {
    let node = MockDisputeNode { link_type, ..node };
    let info = derive(&node, decoder);

    assert_eq!(info.node_hash(), node.hash);
    assert_eq!(info.node_height(), node.depth);
    assert_eq!(info.l1_tx_hash(), node.assertion_tx_hash);
    assert!(info.raw_logs().is_empty());
    assert!(info.raw_messages().is_empty());
    assert!(info.log_val_hashes().is_empty());
    assert!(info.log_acc_hashes().is_empty());
    assert!(info.evm_tx_groups().is_empty());
    assert!(info.evm_tx_hashes().is_empty());
    assert_eq!(info.bloom(), Bloom::ZERO);
}

#[rstest]
fn test_find_logs_over_derived_node(node: MockDisputeNode, decoder: ScriptedDecoder) {
    let info = derive(&node, decoder);

    let all = info.find_logs(&HashSet::default(), &[]);
    let data: Vec<&[u8]> = all.iter().map(|response| &response.log.data.data[..]).collect();
    assert_eq!(data, vec![&b"first"[..], &b"second"[..], &b"third"[..]]);

    let emitter: HashSet<Address> = [EMITTER].into_iter().collect();
    let topics: Vec<HashSet<B256>> = vec![[TOPIC].into_iter().collect()];
    let matched = info.find_logs(&emitter, &topics);
    assert_eq!(matched.len(), 2);
    assert_eq!(matched[1].tx_index, 2);

    let nobody: HashSet<Address> = [Address::repeat_byte(0xff)].into_iter().collect();
    assert!(info.find_logs(&nobody, &[]).is_empty());
}

#[rstest]
fn test_bloom_over_derived_node(node: MockDisputeNode, decoder: ScriptedDecoder) {
    let info = derive(&node, decoder);
    let bloom = info.bloom();

    assert!(bloom.contains_input(BloomInput::Raw(EMITTER.as_slice())));
    assert!(bloom.contains_input(BloomInput::Raw(TOPIC.as_slice())));
    assert_eq!(info.rpc_logs().len(), 3);
}

#[test]
fn test_node_without_logs() {
    let node = DisputeNodeBuilder::new().add_message(raw_value("msg-0")).build();
    let info = derive(&node, ScriptedDecoder::new());

    assert_eq!(info.raw_messages().len(), 1);
    assert!(info.log_acc_hashes().is_empty());
    assert_eq!(info.bloom(), Bloom::ZERO);
    assert!(info.tx_info(B256::ZERO, 0).is_err());
}

proptest! {
    #[test]
    fn prop_accumulator_invariants(raw_logs in prop::collection::vec(any::<Vec<u8>>(), 0..16)) {
        let node = raw_logs
            .iter()
            .cloned()
            .fold(DisputeNodeBuilder::new(), |builder, raw| builder.add_log(AvmValue::from(raw)))
            .build();
        let info = derive(&node, ScriptedDecoder::new());

        prop_assert_eq!(info.raw_logs().len(), raw_logs.len());
        prop_assert_eq!(info.log_val_hashes().len(), raw_logs.len());
        prop_assert_eq!(info.log_acc_hashes().len(), raw_logs.len());
        prop_assert!(info.evm_tx_groups().is_empty());

        let mut acc = B256::ZERO;
        for (i, raw) in info.raw_logs().iter().enumerate() {
            prop_assert_eq!(info.log_val_hashes()[i], KeccakLogHasher.value_hash(raw));
            acc = accumulate(acc, info.log_val_hashes()[i]);
            prop_assert_eq!(info.log_acc_hashes()[i], acc);

            let tx = info.tx_info(B256::ZERO, i as u64).unwrap();
            prop_assert!(tx.verify(&KeccakLogHasher));
        }
    }
}
