use serde::Serialize;
use std::fmt;

use crate::constants::{INITIAL_QUALITY, QUALITY_FLOOR, QUALITY_STEP};

/// JPEG エンコード品質（整数パーセント）
///
/// 0.80 → 0.10 を 0.05 刻みで下げていくため、浮動小数点の誤差が
/// 積もらないよう整数で保持する
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quality(u8);

impl Quality {
    pub const INITIAL: Quality = Quality(INITIAL_QUALITY);
    pub const FLOOR: Quality = Quality(QUALITY_FLOOR);

    /// パーセント値から作成（1-100 以外は None）
    pub fn from_percent(percent: u8) -> Option<Self> {
        (1..=100).contains(&percent).then_some(Self(percent))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// 0.0-1.0 の比率として返す
    pub fn as_ratio(self) -> f32 {
        f32::from(self.0) / 100.0
    }

    pub fn is_floor(self) -> bool {
        self <= Self::FLOOR
    }

    /// 次に試す品質を返す。下限に達していれば None
    pub fn next_lower(self) -> Option<Self> {
        if self.is_floor() {
            return None;
        }
        Some(Self(self.0.saturating_sub(QUALITY_STEP).max(QUALITY_FLOOR)))
    }

    /// 初期品質から下限までの全ステップ
    pub fn schedule() -> impl Iterator<Item = Quality> {
        std::iter::successors(Some(Self::INITIAL), |q| q.next_lower())
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.as_ratio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule() {
        let steps: Vec<u8> = Quality::schedule().map(Quality::percent).collect();
        assert_eq!(
            steps,
            vec![80, 75, 70, 65, 60, 55, 50, 45, 40, 35, 30, 25, 20, 15, 10]
        );
        // 最大15回
        assert_eq!(Quality::schedule().count(), 15);
    }

    #[test]
    fn test_next_lower_stops_at_floor() {
        assert_eq!(Quality::FLOOR.next_lower(), None);
        assert_eq!(
            Quality::from_percent(12).unwrap().next_lower(),
            Some(Quality::FLOOR)
        );
    }

    #[test]
    fn test_from_percent() {
        assert!(Quality::from_percent(0).is_none());
        assert!(Quality::from_percent(101).is_none());
        assert_eq!(Quality::from_percent(55).unwrap().percent(), 55);
    }

    #[test]
    fn test_display() {
        assert_eq!(Quality::INITIAL.to_string(), "0.80");
        assert_eq!(Quality::FLOOR.to_string(), "0.10");
    }
}
