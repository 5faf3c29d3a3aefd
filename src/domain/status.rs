//! Fund status of a deposit transaction.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where a deposit currently is in the settlement workflow.
///
/// Serialized with the labels the operators enter (`等待中`, `已完成交易`, ...).
/// Deserialization goes through [`FromStr`], so request bodies accept the same
/// spellings as query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum FundStatus {
    #[default]
    #[serde(rename = "等待中")]
    Pending,
    #[serde(rename = "已退回")]
    Returned,
    #[serde(rename = "已到账")]
    Received,
    #[serde(rename = "承兑中")]
    Accepting,
    #[serde(rename = "已完成交易")]
    Completed,
    #[serde(rename = "风控调解中")]
    RiskMediation,
    #[serde(rename = "冻结（正在处理）")]
    FrozenProcessing,
    #[serde(rename = "冻结（不能处理）")]
    FrozenUnprocessable,
}

impl FundStatus {
    pub const ALL: [FundStatus; 8] = [
        FundStatus::Pending,
        FundStatus::Returned,
        FundStatus::Received,
        FundStatus::Accepting,
        FundStatus::Completed,
        FundStatus::RiskMediation,
        FundStatus::FrozenProcessing,
        FundStatus::FrozenUnprocessable,
    ];

    /// Operator-facing label, also the stored form.
    pub fn label(&self) -> &'static str {
        match self {
            FundStatus::Pending => "等待中",
            FundStatus::Returned => "已退回",
            FundStatus::Received => "已到账",
            FundStatus::Accepting => "承兑中",
            FundStatus::Completed => "已完成交易",
            FundStatus::RiskMediation => "风控调解中",
            FundStatus::FrozenProcessing => "冻结（正在处理）",
            FundStatus::FrozenUnprocessable => "冻结（不能处理）",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            FundStatus::Pending => "pending",
            FundStatus::Returned => "returned",
            FundStatus::Received => "received",
            FundStatus::Accepting => "accepting",
            FundStatus::Completed => "completed",
            FundStatus::RiskMediation => "risk_mediation",
            FundStatus::FrozenProcessing => "frozen_processing",
            FundStatus::FrozenUnprocessable => "frozen_unprocessable",
        }
    }

    pub fn is_returned(&self) -> bool {
        matches!(self, FundStatus::Returned)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, FundStatus::Completed)
    }

    pub fn is_frozen_unprocessable(&self) -> bool {
        matches!(self, FundStatus::FrozenUnprocessable)
    }

    /// Statuses whose commission and transfer fee are zeroed when saved.
    pub fn waives_charges(&self) -> bool {
        matches!(self, FundStatus::Returned | FundStatus::FrozenUnprocessable)
    }
}

impl std::fmt::Display for FundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fund status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for FundStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Half-width parentheses show up in pasted data.
        let normalized = trimmed.replace('(', "（").replace(')', "）");
        FundStatus::ALL
            .into_iter()
            .find(|st| {
                st.label() == normalized || st.alias().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| UnknownStatus(trimmed.to_string()))
    }
}

impl TryFrom<String> for FundStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&FundStatus::FrozenUnprocessable).unwrap();
        assert_eq!(json, "\"冻结（不能处理）\"");
        let json = serde_json::to_string(&FundStatus::Completed).unwrap();
        assert_eq!(json, "\"已完成交易\"");
    }

    #[test]
    fn test_status_accepts_alias() {
        let st: FundStatus = serde_json::from_str("\"returned\"").unwrap();
        assert_eq!(st, FundStatus::Returned);
        let st: FundStatus = serde_json::from_str("\"已到账\"").unwrap();
        assert_eq!(st, FundStatus::Received);
    }

    #[test]
    fn test_deserialize_matches_from_str() {
        for raw in ["Completed", " completed ", "冻结(不能处理)", "RISK_MEDIATION"] {
            let json = serde_json::to_string(raw).unwrap();
            let from_json: FundStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(from_json, raw.parse::<FundStatus>().unwrap(), "{}", raw);
        }
        let err = serde_json::from_str::<FundStatus>("\"lost\"").unwrap_err();
        assert!(err.to_string().contains("unknown fund status"));
    }

    #[test]
    fn test_from_str_label_alias_and_halfwidth() {
        assert_eq!("已完成交易".parse::<FundStatus>().unwrap(), FundStatus::Completed);
        assert_eq!("Completed".parse::<FundStatus>().unwrap(), FundStatus::Completed);
        assert_eq!(
            "冻结(正在处理)".parse::<FundStatus>().unwrap(),
            FundStatus::FrozenProcessing
        );
        assert!("done".parse::<FundStatus>().is_err());
    }

    #[test]
    fn test_label_roundtrip_for_all() {
        for st in FundStatus::ALL {
            assert_eq!(st.label().parse::<FundStatus>().unwrap(), st);
        }
    }

    #[test]
    fn test_waives_charges() {
        assert!(FundStatus::Returned.waives_charges());
        assert!(FundStatus::FrozenUnprocessable.waives_charges());
        assert!(!FundStatus::FrozenProcessing.waives_charges());
        assert!(!FundStatus::Completed.waives_charges());
    }
}
