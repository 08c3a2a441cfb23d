//! Verdict types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest confidence any verdict may carry
pub const MAX_CONFIDENCE: u8 = 95;

/// Categorical valuation verdict
///
/// Declaration order is the tie-break order for weighted voting: when two
/// verdicts accumulate equal weight, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// No clear mispricing (bond vote)
    Neutral,
    FairlyValued,
    Overvalued,
    Undervalued,
    /// Equity with Tobin's Q far above book
    ExtremelyOvervalued,
    /// Option with implied volatility over double the realized
    MassivelyOverpriced,
    /// Bond yielding above the junk threshold
    JunkHighYield,
    /// Not enough comparable data to judge
    InsufficientData,
}

impl Verdict {
    /// Every verdict in tie-break order
    pub const ALL: [Verdict; 8] = [
        Verdict::Neutral,
        Verdict::FairlyValued,
        Verdict::Overvalued,
        Verdict::Undervalued,
        Verdict::ExtremelyOvervalued,
        Verdict::MassivelyOverpriced,
        Verdict::JunkHighYield,
        Verdict::InsufficientData,
    ];

    /// Wire label, e.g. `FAIRLY_VALUED`
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Neutral => "NEUTRAL",
            Verdict::FairlyValued => "FAIRLY_VALUED",
            Verdict::Overvalued => "OVERVALUED",
            Verdict::Undervalued => "UNDERVALUED",
            Verdict::ExtremelyOvervalued => "EXTREMELY_OVERVALUED",
            Verdict::MassivelyOverpriced => "MASSIVELY_OVERPRICED",
            Verdict::JunkHighYield => "JUNK_HIGH_YIELD",
            Verdict::InsufficientData => "INSUFFICIENT_DATA",
        }
    }

    /// Human label, e.g. `Fairly Valued`
    pub fn title(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn rank(&self) -> usize {
        Self::ALL
            .iter()
            .position(|v| v == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict paired with its confidence percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub verdict: Verdict,
    /// Confidence in percent, never above [`MAX_CONFIDENCE`]
    pub confidence: u8,
}

impl Assessment {
    pub fn new(verdict: Verdict, confidence: u32) -> Self {
        Self {
            verdict,
            confidence: confidence.min(MAX_CONFIDENCE as u32) as u8,
        }
    }

    pub fn insufficient_data() -> Self {
        Self::new(Verdict::InsufficientData, 0)
    }
}

/// One weighted vote from a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub verdict: Verdict,
    pub weight: u32,
}

impl Vote {
    pub fn new(verdict: Verdict, weight: u32) -> Self {
        Self { verdict, weight }
    }
}

/// Accumulated weight per verdict
#[derive(Debug, Clone, Default)]
pub struct VoteTally {
    totals: Vec<(Verdict, u32)>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, vote: Vote) {
        match self.totals.iter_mut().find(|(v, _)| *v == vote.verdict) {
            Some((_, total)) => *total += vote.weight,
            None => self.totals.push((vote.verdict, vote.weight)),
        }
    }

    /// Accumulated weight for one verdict
    pub fn weight_of(&self, verdict: Verdict) -> u32 {
        self.totals
            .iter()
            .find(|(v, _)| *v == verdict)
            .map(|(_, w)| *w)
            .unwrap_or(0)
    }

    /// Verdict with the highest weight, ties broken by declaration order
    pub fn winner(&self) -> Option<Vote> {
        self.totals
            .iter()
            .min_by(|(va, wa), (vb, wb)| wb.cmp(wa).then(va.rank().cmp(&vb.rank())))
            .map(|(verdict, weight)| Vote::new(*verdict, *weight))
    }
}

impl FromIterator<Vote> for VoteTally {
    fn from_iter<I: IntoIterator<Item = Vote>>(iter: I) -> Self {
        let mut tally = VoteTally::new();
        for vote in iter {
            tally.add(vote);
        }
        tally
    }
}
