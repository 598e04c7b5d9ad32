use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    Safe,
    Minor,
    Medium,
    High,
    Critical,
}

/// Score bands in ascending order: (level, lowest score, highest score,
/// highest score that still gets the lower of the band's two ratings).
/// The last band is open-ended.
const BANDS: [(RiskLevel, u32, u32, u32); 5] = [
    (RiskLevel::Safe, 0, 4, 2),
    (RiskLevel::Minor, 5, 8, 6),
    (RiskLevel::Medium, 9, 13, 11),
    (RiskLevel::High, 14, 18, 16),
    (RiskLevel::Critical, 19, u32::MAX, 25),
];

impl RiskLevel {
    pub fn name(self) -> &'static str {
        match self {
            RiskLevel::Safe => "Safe / Low Risk",
            RiskLevel::Minor => "Minor Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::Critical => "Critical Danger",
        }
    }

    pub fn from_score(score: u32) -> Self {
        BANDS
            .iter()
            .find(|(_, min, max, _)| (*min..=*max).contains(&score))
            .map(|(level, ..)| *level)
            .unwrap_or(RiskLevel::Critical)
    }

    /// 1-10 rating within this level's band. Each band splits into a lower
    /// and an upper rating.
    pub fn rating(self, score: u32) -> u8 {
        let band = BANDS.iter().position(|(level, ..)| *level == self).unwrap_or(4);
        let lower = band as u8 * 2 + 1;
        if score <= BANDS[band].3 { lower } else { lower + 1 }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskRating {
    pub level: RiskLevel,
    pub rating: u8,
}

impl RiskRating {
    pub fn tier_name(&self) -> &'static str {
        self.level.name()
    }
}

/// Map a score to its tier and 1-10 rating.
pub fn classify(score: u32) -> RiskRating {
    let level = RiskLevel::from_score(score);
    RiskRating {
        level,
        rating: level.rating(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(score: u32) -> (&'static str, u8) {
        let rating = classify(score);
        (rating.tier_name(), rating.rating)
    }

    #[test]
    fn test_representative_scores() {
        assert_eq!(tier(2), ("Safe / Low Risk", 1));
        assert_eq!(tier(7), ("Minor Risk", 4));
        assert_eq!(tier(11), ("Medium Risk", 5));
        assert_eq!(tier(16), ("High Risk", 7));
        assert_eq!(tier(25), ("Critical Danger", 9));
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(tier(0), ("Safe / Low Risk", 1));
        assert_eq!(tier(3), ("Safe / Low Risk", 2));
        assert_eq!(tier(4), ("Safe / Low Risk", 2));
        assert_eq!(tier(5), ("Minor Risk", 3));
        assert_eq!(tier(6), ("Minor Risk", 3));
        assert_eq!(tier(8), ("Minor Risk", 4));
        assert_eq!(tier(9), ("Medium Risk", 5));
        assert_eq!(tier(12), ("Medium Risk", 6));
        assert_eq!(tier(13), ("Medium Risk", 6));
        assert_eq!(tier(14), ("High Risk", 7));
        assert_eq!(tier(17), ("High Risk", 8));
        assert_eq!(tier(18), ("High Risk", 8));
        assert_eq!(tier(19), ("Critical Danger", 9));
        assert_eq!(tier(26), ("Critical Danger", 10));
        assert_eq!(tier(u32::MAX), ("Critical Danger", 10));
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(RiskLevel::Safe < RiskLevel::Minor);
        assert!(RiskLevel::High < RiskLevel::Critical);
        assert_eq!(RiskLevel::Medium.to_string(), "Medium Risk");
    }
}
