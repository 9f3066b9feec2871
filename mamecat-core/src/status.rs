/// Emulation quality reported by MAME on a machine's `<driver status="...">`.
///
/// Mirrors the values MAME writes into `-listxml` output. Anything else the
/// tool might report is kept as a raw string on the record and never matches
/// an accepted status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    Good,
    Imperfect,
    Preliminary,
}

const ALL_STATUSES: &[DriverStatus] = &[
    DriverStatus::Good,
    DriverStatus::Imperfect,
    DriverStatus::Preliminary,
];

impl DriverStatus {
    /// The attribute value MAME uses for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Imperfect => "imperfect",
            Self::Preliminary => "preliminary",
        }
    }

    pub fn all() -> &'static [DriverStatus] {
        ALL_STATUSES
    }
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string cannot be parsed into a `DriverStatus`.
#[derive(Debug, Clone)]
pub struct StatusParseError(pub String);

impl std::fmt::Display for StatusParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown driver status: '{}'", self.0)
    }
}

impl std::error::Error for StatusParseError {}

impl std::str::FromStr for DriverStatus {
    type Err = StatusParseError;

    /// Parse a status case-insensitively, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_STATUSES
            .iter()
            .copied()
            .find(|status| status.as_str() == lower)
            .ok_or_else(|| StatusParseError(s.to_string()))
    }
}

/// The set of driver statuses a machine may have to enter the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedStatuses(Vec<DriverStatus>);

impl Default for AcceptedStatuses {
    fn default() -> Self {
        Self(vec![DriverStatus::Good])
    }
}

impl AcceptedStatuses {
    pub fn new(statuses: impl IntoIterator<Item = DriverStatus>) -> Self {
        let mut list: Vec<DriverStatus> = Vec::new();
        for status in statuses {
            if !list.contains(&status) {
                list.push(status);
            }
        }
        Self(list)
    }

    /// `{"good"}`, plus `"imperfect"` when `include_imperfect` is set.
    pub fn with_imperfect(include_imperfect: bool) -> Self {
        if include_imperfect {
            Self::new([DriverStatus::Good, DriverStatus::Imperfect])
        } else {
            Self::default()
        }
    }

    /// Whether a raw status string from the tool is in the set. The value
    /// must match exactly as MAME writes it.
    pub fn accepts(&self, status: &str) -> bool {
        self.0.iter().any(|s| s.as_str() == status)
    }

    pub fn statuses(&self) -> &[DriverStatus] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for &status in DriverStatus::all() {
            let parsed: DriverStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("GOOD".parse::<DriverStatus>().unwrap(), DriverStatus::Good);
        assert_eq!(
            " Imperfect ".parse::<DriverStatus>().unwrap(),
            DriverStatus::Imperfect
        );
    }

    #[test]
    fn unknown_status_returns_err() {
        assert!("broken".parse::<DriverStatus>().is_err());
        assert!("".parse::<DriverStatus>().is_err());
    }

    #[test]
    fn default_accepts_only_good() {
        let accepted = AcceptedStatuses::default();
        assert!(accepted.accepts("good"));
        assert!(!accepted.accepts("imperfect"));
        assert!(!accepted.accepts("preliminary"));
        assert!(!accepted.accepts(""));
    }

    #[test]
    fn accepts_requires_an_exact_match() {
        let accepted = AcceptedStatuses::with_imperfect(true);
        assert!(!accepted.accepts("GOOD"));
        assert!(!accepted.accepts("good "));
        assert!(!accepted.accepts(" Imperfect"));
    }

    #[test]
    fn imperfect_extends_the_set() {
        let accepted = AcceptedStatuses::with_imperfect(true);
        assert!(accepted.accepts("good"));
        assert!(accepted.accepts("imperfect"));
        assert!(!accepted.accepts("preliminary"));
    }

    #[test]
    fn duplicates_are_collapsed() {
        let accepted = AcceptedStatuses::new([DriverStatus::Good, DriverStatus::Good]);
        assert_eq!(accepted.statuses(), &[DriverStatus::Good]);
    }
}
