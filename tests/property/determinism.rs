//! Property-based tests for view derivation and rendering determinism

use netview::query::ShowService;
use netview::store::MemoryTableStore;
use netview::views::portchannel::{
    appl_lag_table, appl_member_table, config_table, state_lag_table, state_member_table,
    ForwardingStatus, MemberStatus,
};
use netview::views::render::KeyOrdering;
use netview::views::DisplayNames;
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

fn forwarding() -> impl Strategy<Value = ForwardingStatus> {
    prop_oneof![
        Just(ForwardingStatus::Enabled),
        Just(ForwardingStatus::Disabled),
        Just(ForwardingStatus::Absent),
        Just(ForwardingStatus::Other),
    ]
}

type Members = BTreeMap<u8, (bool, &'static str)>;
type Channels = BTreeMap<u16, (bool, &'static str, Members)>;

/// Port channels by id: active, oper status and members by port number
fn channels() -> impl Strategy<Value = Channels> {
    prop::collection::btree_map(
        1u16..5000,
        (
            any::<bool>(),
            prop::sample::select(vec!["up", "down", "UP", "Down", "", "unknown"]),
            prop::collection::btree_map(
                any::<u8>(),
                (
                    any::<bool>(),
                    prop::sample::select(vec!["enabled", "disabled", "", "pending"]),
                ),
                0..6,
            ),
        ),
        0..8,
    )
}

fn build_store<'a, I>(channels: I) -> MemoryTableStore
where
    I: IntoIterator<Item = (&'a u16, &'a (bool, &'static str, Members))>,
{
    let store = MemoryTableStore::new();
    for (id, (active, oper, members)) in channels {
        let pc = format!("PortChannel{}", id);
        store.insert(&config_table(), &pc, [("mtu", "9100")]);
        store.insert(
            &state_lag_table(),
            &pc,
            [("runner.active", if *active { "true" } else { "false" })],
        );
        store.insert(&appl_lag_table(), &pc, [("oper_status", *oper)]);
        for (port, (selected, status)) in members {
            let member = format!("Ethernet{}", port);
            store.insert(
                &state_member_table(),
                &format!("{}|{}", pc, member),
                [("runner.aggregator.selected", if *selected { "true" } else { "false" })],
            );
            store.insert(
                &appl_member_table(),
                &format!("{}:{}", pc, member),
                [("status", *status)],
            );
        }
    }
    store
}

proptest! {
    #[test]
    fn test_unsynced_rule(selected in any::<bool>(), forwarding in forwarding()) {
        let member = MemberStatus {
            name: "Ethernet0".to_string(),
            selected,
            forwarding,
        };
        let expected = match forwarding {
            ForwardingStatus::Absent => true,
            ForwardingStatus::Enabled => !selected,
            ForwardingStatus::Disabled => selected,
            ForwardingStatus::Other => false,
        };
        prop_assert_eq!(member.is_unsynced(), expected);
        prop_assert_eq!(
            member.display(&DisplayNames::raw()).ends_with('*'),
            expected
        );
    }

    #[test]
    fn test_query_bytes_are_stable(channels in channels()) {
        let service = ShowService::new(Arc::new(build_store(&channels)));
        let first = service.query_path("interface/portchannel").unwrap();
        let second = service.query_path("interface/portchannel").unwrap();
        prop_assert_eq!(&first, &second);

        // Insertion order does not affect output
        let other = ShowService::new(Arc::new(build_store(channels.iter().rev())));
        prop_assert_eq!(first, other.query_path("interface/portchannel").unwrap());
    }

    #[test]
    fn test_keys_and_members_are_ordered(channels in channels()) {
        let service = ShowService::new(Arc::new(build_store(&channels)));
        let view = service.compute(&["interface", "portchannel"]).unwrap();

        let keys: Vec<&str> = view.keys().collect();
        for pair in keys.windows(2) {
            prop_assert_eq!(
                KeyOrdering::Numeric.compare(pair[0], pair[1]),
                std::cmp::Ordering::Less
            );
        }

        for key in keys {
            let ports = view.field(key, "Ports").unwrap();
            let names: Vec<&str> = ports
                .split(' ')
                .filter(|p| !p.is_empty())
                .map(|p| p.split('(').next().unwrap())
                .collect();
            let mut sorted = names.clone();
            sorted.sort_unstable();
            prop_assert_eq!(names, sorted);
        }
    }
}
