//! Port-channel view: `show interfaces portchannel`
//!
//! Cross-references the configured aggregation groups with the teamd/LACP
//! state (`STATE_DB`) and the forwarding-plane state (`APPL_DB`) to derive
//! one record per group:
//!
//! ```text
//! No.  Team Dev         Protocol     Ports
//! ---  ---------------  -----------  --------------------------
//! 102  PortChannel102   LACP(A)(Dw)  Ethernet0(D) Ethernet8(D)
//! ```

use crate::access::{get_field, get_flag, get_folded};
use crate::store::keys::member_prefix;
use crate::store::TableSnapshot;
use crate::types::{DbId, TableId};
use crate::views::enumerate::enumerate_entities;
use crate::views::naming::DisplayNames;
use crate::views::render::{KeyOrdering, RecordSchema, RenderedRecord, RenderedView};
use crate::views::{TableSet, View};

/// Name prefix of aggregation groups; the remainder is the team id.
pub const PORTCHANNEL_PREFIX: &str = "PortChannel";
pub const PROTOCOL: &str = "LACP";

pub const PORTCHANNEL_SCHEMA: RecordSchema = RecordSchema {
    key_label: "No.",
    fields: &["Team Dev", "Protocol", "Ports"],
    ordering: KeyOrdering::Numeric,
};

pub const FLAGS_LEGEND: &str = "Flags: A - active, I - inactive, Up - up, Dw - Down, N/A - not available,\n       S - selected, D - deselected, * - not synced";

const RUNNER_ACTIVE: &str = "runner.active";
const OPER_STATUS: &str = "oper_status";
const AGGREGATOR_SELECTED: &str = "runner.aggregator.selected";
const MEMBER_STATUS: &str = "status";

pub fn config_table() -> TableId {
    TableId::new(DbId::ConfigDb, "PORTCHANNEL")
}

pub fn state_lag_table() -> TableId {
    TableId::new(DbId::StateDb, "LAG_TABLE")
}

pub fn appl_lag_table() -> TableId {
    TableId::new(DbId::ApplDb, "LAG_TABLE")
}

pub fn state_member_table() -> TableId {
    TableId::new(DbId::StateDb, "LAG_MEMBER_TABLE")
}

pub fn appl_member_table() -> TableId {
    TableId::new(DbId::ApplDb, "LAG_MEMBER_TABLE")
}

/// LACP runner activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Active,
    Inactive,
}

impl Activity {
    pub fn marker(&self) -> &'static str {
        match self {
            Activity::Active => "(A)",
            Activity::Inactive => "(I)",
        }
    }
}

/// Operational state of the aggregation group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperState {
    Up,
    Down,
    Unavailable,
}

impl OperState {
    /// Parse a case-folded `oper_status` value
    pub fn from_status(status: &str) -> Self {
        match status {
            "up" => OperState::Up,
            "down" => OperState::Down,
            _ => OperState::Unavailable,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            OperState::Up => "(Up)",
            OperState::Down => "(Dw)",
            OperState::Unavailable => "(N/A)",
        }
    }
}

/// Forwarding-plane enablement of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardingStatus {
    Enabled,
    Disabled,
    /// No status written yet
    Absent,
    /// Any other value
    Other,
}

impl ForwardingStatus {
    pub fn from_field(status: &str) -> Self {
        match status {
            "" => ForwardingStatus::Absent,
            "enabled" => ForwardingStatus::Enabled,
            "disabled" => ForwardingStatus::Disabled,
            _ => ForwardingStatus::Other,
        }
    }
}

/// Derived state of one member port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberStatus {
    pub name: String,
    /// Control-plane selection by the aggregator
    pub selected: bool,
    pub forwarding: ForwardingStatus,
}

impl MemberStatus {
    /// Control-plane selection disagrees with, or is unknown to, the
    /// forwarding plane.
    pub fn is_unsynced(&self) -> bool {
        match self.forwarding {
            ForwardingStatus::Absent => true,
            ForwardingStatus::Enabled => !self.selected,
            ForwardingStatus::Disabled => self.selected,
            ForwardingStatus::Other => false,
        }
    }

    /// `Ethernet0(S)`, `Ethernet8(D)`, `Ethernet16(S)*`
    pub fn display(&self, names: &DisplayNames) -> String {
        let mut out = names.display(&self.name);
        out.push_str(if self.selected { "(S)" } else { "(D)" });
        if self.is_unsynced() {
            out.push('*');
        }
        out
    }
}

/// Derived state of one aggregation group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortChannelStatus {
    pub name: String,
    pub activity: Activity,
    pub oper: OperState,
    /// Sorted by raw member name
    pub members: Vec<MemberStatus>,
}

impl PortChannelStatus {
    pub fn protocol_label(&self) -> String {
        protocol_label(self.activity, self.oper)
    }

    pub fn team_id(&self) -> &str {
        team_id(&self.name)
    }

    pub fn ports(&self, names: &DisplayNames) -> String {
        self.members
            .iter()
            .map(|m| m.display(names))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_record(&self, names: &DisplayNames) -> RenderedRecord {
        RenderedRecord::new(
            self.team_id(),
            vec![self.name.clone(), self.protocol_label(), self.ports(names)],
        )
    }
}

pub fn protocol_label(activity: Activity, oper: OperState) -> String {
    format!("{}{}{}", PROTOCOL, activity.marker(), oper.marker())
}

/// Strip the `PortChannel` prefix. Names without the prefix, or consisting of
/// the prefix alone, are returned unchanged.
pub fn team_id(name: &str) -> &str {
    match name.strip_prefix(PORTCHANNEL_PREFIX) {
        Some(id) if !id.is_empty() => id,
        _ => name,
    }
}

/// Snapshots and naming mode for one port-channel query.
#[derive(Debug)]
pub struct PortChannelContext {
    config: TableSnapshot,
    state_lag: TableSnapshot,
    appl_lag: TableSnapshot,
    state_members: TableSnapshot,
    appl_members: TableSnapshot,
    names: DisplayNames,
}

impl PortChannelContext {
    pub fn new(mut tables: TableSet, names: DisplayNames) -> Self {
        Self {
            config: tables.take(&config_table()),
            state_lag: tables.take(&state_lag_table()),
            appl_lag: tables.take(&appl_lag_table()),
            state_members: tables.take(&state_member_table()),
            appl_members: tables.take(&appl_member_table()),
            names,
        }
    }

    pub fn port_channels(&self) -> Vec<&str> {
        enumerate_entities(&self.config, PORTCHANNEL_PREFIX)
    }

    pub fn activity(&self, pc: &str) -> Activity {
        if get_flag(&self.state_lag, pc, None, RUNNER_ACTIVE) {
            Activity::Active
        } else {
            Activity::Inactive
        }
    }

    pub fn oper_state(&self, pc: &str) -> OperState {
        OperState::from_status(&get_folded(&self.appl_lag, pc, None, OPER_STATUS))
    }

    /// Raw member names found under `pc|` in the state member table, sorted.
    pub fn member_names(&self, pc: &str) -> Vec<&str> {
        let prefix = member_prefix(pc, self.state_members.separator());
        let mut members: Vec<&str> = self
            .state_members
            .keys()
            .filter_map(|key| key.strip_prefix(prefix.as_str()))
            .filter(|member| !member.is_empty())
            .collect();
        members.sort_unstable();
        members
    }

    pub fn member_status(&self, pc: &str, member: &str) -> MemberStatus {
        let selected = get_flag(&self.state_members, pc, Some(member), AGGREGATOR_SELECTED);
        let status = get_field(&self.appl_members, pc, Some(member), MEMBER_STATUS, "");
        MemberStatus {
            name: member.to_string(),
            selected,
            forwarding: ForwardingStatus::from_field(status),
        }
    }

    pub fn derive(&self, pc: &str) -> PortChannelStatus {
        PortChannelStatus {
            name: pc.to_string(),
            activity: self.activity(pc),
            oper: self.oper_state(pc),
            members: self
                .member_names(pc)
                .into_iter()
                .map(|member| self.member_status(pc, member))
                .collect(),
        }
    }

    pub fn derive_all(&self) -> Vec<PortChannelStatus> {
        self.port_channels()
            .into_iter()
            .map(|pc| self.derive(pc))
            .collect()
    }

    pub fn render(&self) -> RenderedView {
        let records = self
            .derive_all()
            .iter()
            .map(|status| status.to_record(&self.names))
            .collect();
        RenderedView::new(PORTCHANNEL_SCHEMA, records)
    }
}

/// `interface/portchannel`
#[derive(Debug, Default)]
pub struct PortChannelView;

impl View for PortChannelView {
    fn path(&self) -> &'static [&'static str] {
        &["interface", "portchannel"]
    }

    fn scope(&self) -> Vec<TableId> {
        vec![
            config_table(),
            state_lag_table(),
            appl_lag_table(),
            state_member_table(),
            appl_member_table(),
        ]
    }

    fn render(&self, tables: TableSet, names: &DisplayNames) -> RenderedView {
        PortChannelContext::new(tables, names.clone()).render()
    }
}
