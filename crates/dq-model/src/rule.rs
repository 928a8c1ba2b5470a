use crate::error::{QualityError, Result};

/// Closed set of validity conditions. Matched exhaustively everywhere, so
/// adding a kind is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Equal,
    Min,
    Max,
    In,
    Between,
    Regex,
}

impl RuleKind {
    pub const ALL: [Self; 6] = [
        Self::Equal,
        Self::Min,
        Self::Max,
        Self::In,
        Self::Between,
        Self::Regex,
    ];

    /// Parse a user-supplied kind name. Unknown kinds cannot be represented
    /// by the enum, so this seam is where `UnsupportedRule` surfaces.
    pub fn parse(kind: &str) -> Result<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(Self::Equal),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "in" => Ok(Self::In),
            "between" => Ok(Self::Between),
            "regex" => Ok(Self::Regex),
            other => Err(QualityError::UnsupportedRule {
                kind: other.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Min => "min",
            Self::Max => "max",
            Self::In => "in",
            Self::Between => "between",
            Self::Regex => "regex",
        }
    }
}

/// Operand of a validity rule. The expected shape depends on the kind:
/// scalar for `equal`/`min`/`max`/`regex`, list for `in`/`between`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum RuleOperand {
    Scalar(String),
    List(Vec<String>),
}

/// A user-specified validity condition over one column.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidityRule {
    pub kind: RuleKind,
    pub operand: RuleOperand,
}

impl ValidityRule {
    pub fn new(kind: RuleKind, operand: RuleOperand) -> Self {
        Self { kind, operand }
    }

    pub fn equal(value: impl Into<String>) -> Self {
        Self::new(RuleKind::Equal, RuleOperand::Scalar(value.into()))
    }

    pub fn min(bound: impl Into<String>) -> Self {
        Self::new(RuleKind::Min, RuleOperand::Scalar(bound.into()))
    }

    pub fn max(bound: impl Into<String>) -> Self {
        Self::new(RuleKind::Max, RuleOperand::Scalar(bound.into()))
    }

    pub fn is_in(values: Vec<String>) -> Self {
        Self::new(RuleKind::In, RuleOperand::List(values))
    }

    pub fn between(lower: impl Into<String>, upper: impl Into<String>) -> Self {
        Self::new(
            RuleKind::Between,
            RuleOperand::List(vec![lower.into(), upper.into()]),
        )
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::new(RuleKind::Regex, RuleOperand::Scalar(pattern.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_kinds() {
        for kind in RuleKind::ALL {
            assert_eq!(RuleKind::parse(kind.as_str()).unwrap(), kind);
        }
        assert_eq!(RuleKind::parse(" Between ").unwrap(), RuleKind::Between);
    }

    #[test]
    fn parse_rejects_unknown_kind() {
        let err = RuleKind::parse("approximately").unwrap_err();
        assert!(
            matches!(err, QualityError::UnsupportedRule { kind } if kind == "approximately")
        );
    }

    #[test]
    fn rule_round_trips_through_json() {
        let rule = ValidityRule::between("2", "5");
        let json = serde_json::to_string(&rule).unwrap();
        let round: ValidityRule = serde_json::from_str(&json).unwrap();
        assert_eq!(round, rule);
    }
}
