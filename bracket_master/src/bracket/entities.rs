use serde::{Deserialize, Serialize};
use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};
use uuid::Uuid;

use super::{
    constants,
    errors::{BracketError, BracketResult},
};

/// Opaque, unique competitor identity.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct CompetitorId(Uuid);

impl CompetitorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CompetitorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CompetitorId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A team or player entered in a tournament.
///
/// Competitors are immutable once created and compare by id only, so two
/// entries with the same name are still distinct competitors.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub name: String,
}

impl Competitor {
    pub fn new(name: &str) -> Self {
        Self {
            id: CompetitorId::new(),
            name: clean_name(name),
        }
    }
}

impl PartialEq for Competitor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Competitor {}

impl Hash for Competitor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

/// Trims surrounding whitespace and caps the length of a user-entered name.
pub fn clean_name(name: &str) -> String {
    name.trim().chars().take(constants::MAX_NAME_LENGTH).collect()
}

/// One of the two entry positions of a match.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Side {
    One,
    Two,
}

impl Side {
    /// Offset of the feeder match for this side, relative to `2 * index`.
    pub fn feeder_offset(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// Side of the parent match that the winner of `match_index` lands on.
    pub fn for_parent_of(match_index: usize) -> Self {
        if match_index % 2 == 0 {
            Self::One
        } else {
            Self::Two
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "1"),
            Self::Two => write!(f, "2"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Self::One),
            "2" => Ok(Self::Two),
            other => Err(format!("Invalid side '{other}': expected 1 or 2")),
        }
    }
}

/// How many game wins decide a match.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchType {
    #[default]
    Single,
    BestOf3,
}

impl MatchType {
    pub fn wins_required(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::BestOf3 => 2,
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::BestOf3 => write!(f, "bestOf3"),
        }
    }
}

impl FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "bestof3" | "bo3" => Ok(Self::BestOf3),
            other => Err(format!("Invalid match type '{other}': expected single or bestOf3")),
        }
    }
}

/// Seeding policy used when auto-filling seed slots.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedMode {
    /// Always halve recursively; byes land in round one.
    Standard,
    /// Pair eagerly whenever two competitors remain; byes move to later rounds.
    #[default]
    Compact,
}

impl fmt::Display for SeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

impl FromStr for SeedMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "compact" => Ok(Self::Compact),
            other => Err(format!("Invalid seed mode '{other}': expected standard or compact")),
        }
    }
}

/// Whether seeding splits the roster into two halves at the root.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Double,
    Single,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Double => write!(f, "double"),
            Self::Single => write!(f, "single"),
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "double" => Ok(Self::Double),
            "single" => Ok(Self::Single),
            other => Err(format!("Invalid layout '{other}': expected double or single")),
        }
    }
}

/// Flat round-one seed slots. Slots `2i` and `2i + 1` feed match `i` of round 0.
pub type SeedSlots = Vec<Option<Competitor>>;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Position within its round.
    pub id: usize,
    pub side1: Option<Competitor>,
    pub side2: Option<Competitor>,
    /// Originating seed slot, only set in round 0.
    pub source_slot1: Option<usize>,
    pub source_slot2: Option<usize>,
    pub wins1: u32,
    pub wins2: u32,
    pub winner: Option<Competitor>,
}

impl Match {
    /// An empty match in a later round, waiting on its feeders.
    pub fn pending(id: usize) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// A round-0 match fed directly by seed slots `first_slot` and `first_slot + 1`.
    pub fn seeded(
        id: usize,
        first_slot: usize,
        side1: Option<Competitor>,
        side2: Option<Competitor>,
    ) -> Self {
        Self {
            id,
            side1,
            side2,
            source_slot1: Some(first_slot),
            source_slot2: Some(first_slot + 1),
            ..Default::default()
        }
    }

    pub fn competitor(&self, side: Side) -> Option<&Competitor> {
        match side {
            Side::One => self.side1.as_ref(),
            Side::Two => self.side2.as_ref(),
        }
    }

    pub(crate) fn set_competitor(&mut self, side: Side, competitor: Competitor) {
        match side {
            Side::One => self.side1 = Some(competitor),
            Side::Two => self.side2 = Some(competitor),
        }
    }

    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::One => self.wins1,
            Side::Two => self.wins2,
        }
    }

    pub(crate) fn set_wins(&mut self, side: Side, wins: u32) {
        match side {
            Side::One => self.wins1 = wins,
            Side::Two => self.wins2 = wins,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Side holding the decided winner, if any.
    pub fn winning_side(&self) -> Option<Side> {
        let winner = self.winner.as_ref()?;
        if self.side1.as_ref() == Some(winner) {
            Some(Side::One)
        } else if self.side2.as_ref() == Some(winner) {
            Some(Side::Two)
        } else {
            None
        }
    }
}

/// Rounds of matches addressed by `(round, index)`.
///
/// Round 0 has `capacity / 2` matches and every later round halves, ending in
/// a single final. Match `m` of round `r` feeds match `m / 2` of round `r + 1`.
/// Values can only be built through [`build_bracket`](super::structure::build_bracket)
/// or deserialization, both of which check this shape, so index arithmetic
/// between parent and feeder matches never leaves the arena.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "Vec<Vec<Match>>", into = "Vec<Vec<Match>>")]
pub struct Bracket {
    rounds: Vec<Vec<Match>>,
}

impl Bracket {
    pub(crate) fn from_rounds(rounds: Vec<Vec<Match>>) -> Self {
        Self { rounds }
    }

    pub fn rounds(&self) -> &[Vec<Match>] {
        &self.rounds
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn final_round(&self) -> usize {
        self.rounds.len() - 1
    }

    /// Number of round-0 seed slots feeding this bracket.
    pub fn capacity(&self) -> usize {
        self.rounds[0].len() * 2
    }

    pub fn round(&self, round: usize) -> BracketResult<&[Match]> {
        self.rounds
            .get(round)
            .map(Vec::as_slice)
            .ok_or(BracketError::RoundOutOfRange {
                round,
                rounds: self.rounds.len(),
            })
    }

    pub fn get(&self, round: usize, index: usize) -> BracketResult<&Match> {
        let matches = self.round(round)?;
        matches.get(index).ok_or(BracketError::MatchOutOfRange {
            round,
            index,
            matches: matches.len(),
        })
    }

    pub(crate) fn get_mut(&mut self, round: usize, index: usize) -> BracketResult<&mut Match> {
        let rounds = self.rounds.len();
        let matches = self
            .rounds
            .get_mut(round)
            .ok_or(BracketError::RoundOutOfRange { round, rounds })?;
        let len = matches.len();
        matches.get_mut(index).ok_or(BracketError::MatchOutOfRange {
            round,
            index,
            matches: len,
        })
    }

    /// Lookup used by the internal passes; `None` past the edge of the tree.
    pub(crate) fn lookup(&self, round: usize, index: usize) -> Option<&Match> {
        self.rounds.get(round)?.get(index)
    }

    /// Writes `winner` into the parent of `(round, index)`.
    ///
    /// Returns the winner back as champion when the match is the final.
    pub(crate) fn advance(
        &mut self,
        round: usize,
        index: usize,
        winner: Competitor,
    ) -> Option<Competitor> {
        if round == self.final_round() {
            return Some(winner);
        }
        let side = Side::for_parent_of(index);
        self.rounds[round + 1][index / 2].set_competitor(side, winner);
        None
    }

    pub(crate) fn set_winner(&mut self, round: usize, index: usize, winner: Competitor) {
        self.rounds[round][index].winner = Some(winner);
    }

    /// The decided winner of the final, if any.
    pub fn champion(&self) -> Option<&Competitor> {
        self.rounds[self.final_round()][0].winner.as_ref()
    }
}

impl TryFrom<Vec<Vec<Match>>> for Bracket {
    type Error = BracketError;

    fn try_from(rounds: Vec<Vec<Match>>) -> Result<Self, Self::Error> {
        let Some(first) = rounds.first() else {
            return Err(BracketError::MalformedBracket(
                "bracket has no rounds".to_string(),
            ));
        };

        let capacity = first.len() * 2;
        if !capacity.is_power_of_two() || capacity < constants::MIN_CAPACITY {
            return Err(BracketError::InvalidCapacity { len: capacity });
        }

        let mut expected = first.len();
        for (round, matches) in rounds.iter().enumerate() {
            if matches.len() != expected {
                return Err(BracketError::MalformedBracket(format!(
                    "round {round} has {} matches, expected {expected}",
                    matches.len()
                )));
            }
            if let Some(m) = matches.iter().enumerate().find(|(i, m)| m.id != *i) {
                return Err(BracketError::MalformedBracket(format!(
                    "round {round} match at position {} carries id {}",
                    m.0, m.1.id
                )));
            }
            expected /= 2;
        }

        if rounds.last().map(Vec::len) != Some(1) {
            return Err(BracketError::MalformedBracket(
                "bracket does not end in a single final".to_string(),
            ));
        }

        Ok(Self { rounds })
    }
}

impl From<Bracket> for Vec<Vec<Match>> {
    fn from(bracket: Bracket) -> Self {
        bracket.rounds
    }
}

/// Snapshot produced by the progression and bye-resolution passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    pub bracket: Bracket,
    /// Champion decided during this pass, if any.
    pub champion: Option<Competitor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competitor_identity_is_by_id() {
        let a = Competitor::new("Ada");
        let b = Competitor::new("Ada");
        assert_ne!(a, b);

        let renamed = Competitor {
            id: a.id,
            name: "Someone else".to_string(),
        };
        assert_eq!(a, renamed);
    }

    #[test]
    fn test_competitor_name_is_trimmed_and_capped() {
        let c = Competitor::new("   Padded   ");
        assert_eq!(c.name, "Padded");

        let long = "x".repeat(constants::MAX_NAME_LENGTH + 10);
        assert_eq!(
            Competitor::new(&long).name.len(),
            constants::MAX_NAME_LENGTH
        );
    }

    #[test]
    fn test_side_for_parent() {
        assert_eq!(Side::for_parent_of(0), Side::One);
        assert_eq!(Side::for_parent_of(1), Side::Two);
        assert_eq!(Side::for_parent_of(6), Side::One);
        assert_eq!(Side::for_parent_of(7), Side::Two);
    }

    #[test]
    fn test_wins_required() {
        assert_eq!(MatchType::Single.wins_required(), 1);
        assert_eq!(MatchType::BestOf3.wins_required(), 2);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&MatchType::BestOf3).unwrap(), "\"bestOf3\"");
        assert_eq!(serde_json::to_string(&SeedMode::Compact).unwrap(), "\"compact\"");
        assert_eq!(serde_json::to_string(&Layout::Double).unwrap(), "\"double\"");
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("bestOf3".parse::<MatchType>(), Ok(MatchType::BestOf3));
        assert_eq!("Standard".parse::<SeedMode>(), Ok(SeedMode::Standard));
        assert_eq!("single".parse::<Layout>(), Ok(Layout::Single));
        assert!("triple".parse::<Layout>().is_err());
        assert_eq!("2".parse::<Side>(), Ok(Side::Two));
        assert!("3".parse::<Side>().is_err());
    }

    #[test]
    fn test_match_field_names() {
        let m = Match::seeded(0, 0, None, None);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["sourceSlot1"], 0);
        assert_eq!(json["sourceSlot2"], 1);
        assert!(json["side1"].is_null());
        assert!(json["winner"].is_null());
    }

    #[test]
    fn test_bracket_rejects_bad_shapes() {
        let empty: Result<Bracket, _> = serde_json::from_str("[]");
        assert!(empty.is_err());

        // Three first-round matches is not a power-of-two capacity
        let three = vec![vec![Match::pending(0), Match::pending(1), Match::pending(2)]];
        assert_eq!(
            Bracket::try_from(three),
            Err(BracketError::InvalidCapacity { len: 6 })
        );

        // Missing the final
        let truncated = vec![vec![Match::pending(0), Match::pending(1)]];
        assert!(matches!(
            Bracket::try_from(truncated),
            Err(BracketError::MalformedBracket(_))
        ));

        // Ids must match positions
        let shuffled = vec![vec![Match::pending(1)]];
        assert!(matches!(
            Bracket::try_from(shuffled),
            Err(BracketError::MalformedBracket(_))
        ));
    }
}
