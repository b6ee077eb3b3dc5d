//! Three-way identity classification over billing, shipping and card names.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::nicknames::NicknameRegistry;
use crate::normalize::{CardName, StructuredName, normalize_token};
use crate::{ClientError, ClientResult};

/// Largest edit distance still treated as a typo of the same name.
pub const MAX_TYPO_DISTANCE: usize = 2;

/// How many distinct identities the three name sources imply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    SingleIdentity,
    TwoIdentities,
    ThreeIdentities,
}

impl Classification {
    pub const fn code(self) -> u8 {
        match self {
            Self::SingleIdentity => 1,
            Self::TwoIdentities => 2,
            Self::ThreeIdentities => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleIdentity => "single_identity",
            Self::TwoIdentities => "two_identities",
            Self::ThreeIdentities => "three_identities",
        }
    }
}

/// The five raw name fields of one transaction. `None` marks a field the
/// caller could not supply.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionNames<'a> {
    pub bill_first_name: Option<&'a str>,
    pub bill_last_name: Option<&'a str>,
    pub ship_first_name: Option<&'a str>,
    pub ship_last_name: Option<&'a str>,
    pub name_on_card: Option<&'a str>,
}

impl<'a> TransactionNames<'a> {
    pub fn new(
        bill_first_name: &'a str,
        bill_last_name: &'a str,
        ship_first_name: &'a str,
        ship_last_name: &'a str,
        name_on_card: &'a str,
    ) -> Self {
        Self {
            bill_first_name: Some(bill_first_name),
            bill_last_name: Some(bill_last_name),
            ship_first_name: Some(ship_first_name),
            ship_last_name: Some(ship_last_name),
            name_on_card: Some(name_on_card),
        }
    }
}

/// The individual comparisons behind a [`Classification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonOutcome {
    pub bill_vs_ship: bool,
    pub bill_vs_card: bool,
    /// Only evaluated when both billing comparisons fail.
    pub ship_vs_card: Option<bool>,
    pub classification: Classification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BillingAgreement {
    Both,
    Neither,
    Partial,
}

impl BillingAgreement {
    fn from_comparisons(bill_vs_ship: bool, bill_vs_card: bool) -> Self {
        match (bill_vs_ship, bill_vs_card) {
            (true, true) => Self::Both,
            (false, false) => Self::Neither,
            _ => Self::Partial,
        }
    }
}

struct NormalizedNames {
    bill_first: StructuredName,
    bill_last: String,
    ship_first: StructuredName,
    ship_last: String,
    card: CardName,
}

impl NormalizedNames {
    fn from_raw(names: &TransactionNames<'_>) -> ClientResult<Self> {
        let bill_first = required(names.bill_first_name, "bill_first_name")?;
        let bill_last = required(names.bill_last_name, "bill_last_name")?;
        let ship_first = required(names.ship_first_name, "ship_first_name")?;
        let ship_last = required(names.ship_last_name, "ship_last_name")?;
        let name_on_card = required(names.name_on_card, "name_on_card")?;

        Ok(Self {
            bill_first: StructuredName::parse(bill_first),
            bill_last: normalize_token(bill_last),
            ship_first: StructuredName::parse(ship_first),
            ship_last: normalize_token(ship_last),
            card: CardName::parse(name_on_card)?,
        })
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> ClientResult<&'a str> {
    value.ok_or_else(|| ClientError::missing_field(field))
}

/// Classifies transactions against one immutable nickname registry.
///
/// Cloning is cheap; clones share the registry.
#[derive(Debug, Clone)]
pub struct IdentityClassifier {
    registry: Arc<NicknameRegistry>,
}

impl IdentityClassifier {
    pub fn new(registry: NicknameRegistry) -> Self {
        Self::with_shared_registry(Arc::new(registry))
    }

    pub fn with_shared_registry(registry: Arc<NicknameRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &NicknameRegistry {
        &self.registry
    }

    /// Two normalized tokens name the same person when they are registered
    /// nicknames of each other or differ by at most [`MAX_TYPO_DISTANCE`]
    /// edits. Not transitive.
    pub fn equivalent(&self, left: &str, right: &str) -> bool {
        self.registry.is_nickname_of(left, right)
            || edit_distance(left, right) <= MAX_TYPO_DISTANCE
    }

    pub fn classify(&self, names: &TransactionNames<'_>) -> ClientResult<Classification> {
        self.compare(names).map(|outcome| outcome.classification)
    }

    pub fn compare(&self, names: &TransactionNames<'_>) -> ClientResult<ComparisonOutcome> {
        let normalized = NormalizedNames::from_raw(names)?;

        let bill_vs_ship = self.bill_matches_ship(&normalized);
        let bill_vs_card = self.bill_matches_card(&normalized);
        trace!(bill_vs_ship, bill_vs_card, "compared billing name");

        let (classification, ship_vs_card) =
            match BillingAgreement::from_comparisons(bill_vs_ship, bill_vs_card) {
                BillingAgreement::Both => (Classification::SingleIdentity, None),
                BillingAgreement::Neither => {
                    let ship_vs_card = self.ship_matches_card(&normalized);
                    let classification = if ship_vs_card {
                        Classification::TwoIdentities
                    } else {
                        Classification::ThreeIdentities
                    };
                    (classification, Some(ship_vs_card))
                }
                BillingAgreement::Partial => (Classification::TwoIdentities, None),
            };

        debug!(
            bill_vs_ship,
            bill_vs_card,
            ship_vs_card = ?ship_vs_card,
            code = classification.code(),
            "classified transaction names"
        );

        Ok(ComparisonOutcome {
            bill_vs_ship,
            bill_vs_card,
            ship_vs_card,
            classification,
        })
    }

    fn bill_matches_ship(&self, names: &NormalizedNames) -> bool {
        let matched = self.equivalent(names.bill_first.first(), names.ship_first.first())
            && self.equivalent(&names.bill_last, &names.ship_last);

        match (names.bill_first.middle(), names.ship_first.middle()) {
            (Some(bill_middle), Some(ship_middle)) if matched => {
                self.equivalent(bill_middle, ship_middle)
            }
            _ => matched,
        }
    }

    // The card may be printed "Last First"; only the billing name gets that
    // allowance.
    fn bill_matches_card(&self, names: &NormalizedNames) -> bool {
        let card = &names.card;
        let first = names.bill_first.first();
        let last = names.bill_last.as_str();

        let direct = self.equivalent(first, card.first()) && self.equivalent(last, card.last());
        let swapped = self.equivalent(first, card.last()) && self.equivalent(last, card.first());

        self.middle_agrees(&names.bill_first, card, direct || swapped)
    }

    fn ship_matches_card(&self, names: &NormalizedNames) -> bool {
        let card = &names.card;
        let direct = self.equivalent(names.ship_first.first(), card.first())
            && self.equivalent(&names.ship_last, card.last());

        self.middle_agrees(&names.ship_first, card, direct)
    }

    fn middle_agrees(&self, first_name: &StructuredName, card: &CardName, matched: bool) -> bool {
        match (first_name.middle(), card.middle()) {
            (Some(name_middle), Some(card_middle)) if matched => {
                self.equivalent(name_middle, card_middle)
            }
            _ => matched,
        }
    }
}

pub fn edit_distance(left: &str, right: &str) -> usize {
    strsim::levenshtein(left, right)
}
