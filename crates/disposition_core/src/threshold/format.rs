//! Plain-text rendering of solver output.

use std::fmt;

use super::{ClauseTarget, SideCondition, TargetStatus, ThresholdReport};

pub const DISPOSITION_HEADER: &str = "enters disposition:";
pub const ONE_STEP_HEADER: &str = "one step away (any one of):";
pub const NOTHING_REACHABLE: &str = "none: no clause reachable within limit up";

impl ClauseTarget {
    /// One display line: label, price status, then the extra-axis note.
    pub fn line(&self) -> String {
        match self.status {
            TargetStatus::Unconstrained => format!("{}: {}{}", self.label, self.status, self.side),
            _ => format!(
                "{}: target {:.2} {}{}",
                self.label, self.target_price, self.status, self.side
            ),
        }
    }
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetStatus::NeedsRise { pct } => write!(f, "(needs +{pct:.2}%)"),
            TargetStatus::CanFall { pct } => write!(f, "(can fall {:.2}%)", pct.abs()),
            TargetStatus::MustEnter { limit_down } => {
                write!(f, "(below limit down {limit_down:.2}, enters disposition regardless)")
            }
            TargetStatus::Unconstrained => f.write_str("no price constraint (ratios undefined)"),
        }
    }
}

impl fmt::Display for SideCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideCondition::None => Ok(()),
            SideCondition::VolumeSurge {
                required_lots,
                met_today: true,
            } => write!(f, " + volume > {required_lots} lots"),
            SideCondition::VolumeSurge {
                required_lots,
                met_today: false,
            } => write!(f, " + (needs volume > {required_lots} lots)"),
            SideCondition::VolumeHistoryShort { required, actual } => {
                write!(f, " + volume average unknown ({actual}/{required} days)")
            }
            SideCondition::Turnover {
                required_lots: Some(lots),
                floor_lots: None,
                ..
            } => write!(f, " + volume > {lots} lots"),
            SideCondition::Turnover {
                required_lots: Some(lots),
                floor_lots: Some(floor),
                ..
            } => write!(f, " + (needs volume > {} lots)", (*lots).max(*floor)),
            SideCondition::Turnover {
                rate_pct,
                required_lots: None,
                floor_lots,
            } => {
                write!(f, " + turnover unknown (needs turnover >= {rate_pct}%")?;
                if let Some(floor) = floor_lots {
                    write!(f, " & volume > {floor} lots")?;
                }
                f.write_str(")")
            }
            SideCondition::BrokerConcentration { pct } => {
                write!(f, " + broker share > {pct}% (not computable from price data)")
            }
        }
    }
}

pub fn report_lines(report: &ThresholdReport) -> Vec<String> {
    let mut lines = vec![format!(
        "latest close {:.2}  limit up {:.2}",
        report.last_close, report.limit_up
    )];
    if !report.disposition.is_empty() {
        lines.push(DISPOSITION_HEADER.to_owned());
        lines.extend(report.disposition.iter().map(ClauseTarget::line));
    }
    if !report.one_step_away.is_empty() {
        lines.push(ONE_STEP_HEADER.to_owned());
        lines.extend(report.one_step_away.iter().map(ClauseTarget::line));
    }
    if report.disposition.is_empty() && report.one_step_away.is_empty() {
        lines.push(NOTHING_REACHABLE.to_owned());
    }
    lines
}
