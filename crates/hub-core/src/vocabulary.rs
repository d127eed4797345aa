//! Fixed label vocabularies shared by resources, drafts, and filter criteria.
//!
//! Every label serialises to its human-readable form (e.g. `"Food
//! Assistance"`), which is also what the backend stores. Parsing accepts that
//! form case-insensitively, as well as a kebab-case alias for command-line use.

use std::{collections::BTreeSet, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, de};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

// ─── Category ────────────────────────────────────────────────────────────────

/// The directory section a resource is listed under.
///
/// Text from the backend that matches no known category is kept as
/// [`Category::Other`] so one odd row never hides the rest of the collection.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(from = "String", into = "&'static str")]
pub enum Category {
  #[strum(to_string = "Food Assistance", serialize = "food-assistance")]
  FoodAssistance,
  #[strum(to_string = "Education")]
  Education,
  #[strum(to_string = "Senior Care", serialize = "senior-care")]
  SeniorCare,
  #[strum(to_string = "Youth Services", serialize = "youth-services")]
  YouthServices,
  #[strum(to_string = "Health & Wellness", serialize = "health-wellness", serialize = "health")]
  HealthAndWellness,
  #[strum(to_string = "Employment")]
  Employment,
  #[strum(to_string = "Housing")]
  Housing,
  #[strum(to_string = "Transportation")]
  Transportation,
  #[strum(to_string = "Legal Services", serialize = "legal-services")]
  LegalServices,
  #[strum(to_string = "Mental Health", serialize = "mental-health")]
  MentalHealth,
  #[strum(to_string = "Emergency Services", serialize = "emergency-services")]
  EmergencyServices,
  #[strum(to_string = "Community Centers", serialize = "community-centers")]
  CommunityCenters,
  #[strum(
    to_string = "Religious Organizations",
    serialize = "religious-organizations"
  )]
  ReligiousOrganizations,
  #[strum(to_string = "Other")]
  Other,
}

impl From<String> for Category {
  fn from(value: String) -> Self { value.parse().unwrap_or(Self::Other) }
}

// ─── Accessibility ───────────────────────────────────────────────────────────

/// An accessibility accommodation a resource offers.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
pub enum AccessibilityFeature {
  #[strum(to_string = "Wheelchair Accessible", serialize = "wheelchair")]
  WheelchairAccessible,
  #[strum(to_string = "Sign Language Interpreter", serialize = "sign-language")]
  SignLanguageInterpreter,
  #[strum(to_string = "Audio Description", serialize = "audio-description")]
  AudioDescription,
  #[strum(to_string = "Large Print Materials", serialize = "large-print")]
  LargePrintMaterials,
  #[strum(to_string = "Service Animal Friendly", serialize = "service-animal")]
  ServiceAnimalFriendly,
  #[strum(to_string = "Accessible Parking", serialize = "parking")]
  AccessibleParking,
  #[strum(to_string = "Elevator Access", serialize = "elevator")]
  ElevatorAccess,
  #[strum(to_string = "Ramp Access", serialize = "ramp")]
  RampAccess,
  #[strum(to_string = "Braille Materials", serialize = "braille")]
  BrailleMaterials,
  #[strum(to_string = "Assistive Technology", serialize = "assistive-technology")]
  AssistiveTechnology,
}

// ─── Language ────────────────────────────────────────────────────────────────

/// A language services are offered in.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Language {
  English,
  Spanish,
  French,
  German,
  Italian,
  Portuguese,
  Chinese,
  Japanese,
  Korean,
  Arabic,
  Russian,
  Other,
}

// ─── Service type ────────────────────────────────────────────────────────────

/// How a resource is paid for. Matched against the free-text cost field.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ServiceType {
  #[strum(to_string = "Free")]
  Free,
  #[strum(to_string = "Low Cost", serialize = "low-cost")]
  LowCost,
  #[strum(to_string = "Sliding Scale", serialize = "sliding-scale")]
  SlidingScale,
  #[strum(to_string = "Paid")]
  Paid,
}

impl ServiceType {
  /// Lower-case fragments whose presence in the cost text implies this label.
  pub fn keywords(self) -> &'static [&'static str] {
    match self {
      Self::Free => &["free", "no cost", "no charge"],
      Self::LowCost => &["low-cost", "low cost", "reduced", "discount"],
      Self::SlidingScale => {
        &["sliding scale", "sliding-scale", "income-based", "income based"]
      }
      Self::Paid => &["$", "fee", "paid"],
    }
  }

  pub fn matches(self, cost: &str) -> bool { contains_any(cost, self.keywords()) }
}

// ─── Availability ────────────────────────────────────────────────────────────

/// When a resource is open. Matched against the free-text hours field.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Availability {
  #[strum(to_string = "Weekdays")]
  Weekdays,
  #[strum(to_string = "Weekends")]
  Weekends,
  #[strum(to_string = "Evenings")]
  Evenings,
  #[strum(to_string = "24/7", serialize = "24-7", serialize = "always")]
  AroundTheClock,
}

impl Availability {
  /// Lower-case fragments whose presence in the hours text implies this label.
  pub fn keywords(self) -> &'static [&'static str] {
    match self {
      Self::Weekdays => &["mon", "tue", "wed", "thu", "fri", "weekday"],
      Self::Weekends => &["sat", "sun", "weekend"],
      Self::Evenings => &["evening", "night", "6pm", "7pm", "8pm", "9pm", "10pm"],
      Self::AroundTheClock => &["24/7", "24 hours", "24hr", "24-hour"],
    }
  }

  pub fn matches(self, hours: &str) -> bool { contains_any(hours, self.keywords()) }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn contains_any(text: &str, keywords: &[&str]) -> bool {
  let text = text.to_lowercase();
  keywords.iter().any(|k| text.contains(k))
}

macro_rules! label_from_string {
  ($ty:ty, $vocabulary:literal) => {
    impl TryFrom<String> for $ty {
      type Error = Error;

      fn try_from(value: String) -> Result<Self> {
        match value.parse() {
          Ok(label) => Ok(label),
          Err(_) => Err(Error::UnknownLabel {
            vocabulary: $vocabulary,
            label:      value,
          }),
        }
      }
    }
  };
}

label_from_string!(AccessibilityFeature, "accessibility");
label_from_string!(Language, "language");
label_from_string!(ServiceType, "service type");
label_from_string!(Availability, "availability");

/// Deserialise a nullable list of labels, skipping entries outside the
/// vocabulary.
pub(crate) fn lenient_set<'de, D, T>(deserializer: D) -> Result<BTreeSet<T>, D::Error>
where
  D: Deserializer<'de>,
  T: FromStr + Ord,
{
  let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
  Ok(
    raw
      .unwrap_or_default()
      .iter()
      .filter_map(|label| label.trim().parse().ok())
      .collect(),
  )
}

/// Deserialise an optional category, rejecting text outside the vocabulary
/// instead of falling back to [`Category::Other`]. Blank text means unset.
pub(crate) fn strict_category<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
  D: Deserializer<'de>,
{
  let Some(raw) = Option::<String>::deserialize(deserializer)? else {
    return Ok(None);
  };
  let label = raw.trim();
  if label.is_empty() {
    return Ok(None);
  }
  label.parse::<Category>().map(Some).map_err(|_| {
    de::Error::custom(Error::UnknownLabel {
      vocabulary: "category",
      label:      raw.clone(),
    })
  })
}

/// Deserialise a nullable value into its default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
