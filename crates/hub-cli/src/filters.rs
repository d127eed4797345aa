//! `hub resources` flags and their mapping onto [`FilterCriteria`].

use clap::Args;
use hub_core::{
  criteria::{CategoryFilter, FilterCriteria, SortKey},
  resource::ResourceId,
  vocabulary::{AccessibilityFeature, Availability, Language, ServiceType},
};

#[derive(Args, Debug, Default)]
pub struct ResourceArgs {
  /// Case-insensitive text matched against name, description and tags.
  #[arg(short, long)]
  pub search: Option<String>,

  /// Category label, or "all".
  #[arg(long, default_value = "all")]
  pub category: CategoryFilter,

  /// Cost label (free, low-cost, sliding-scale, paid). Repeatable.
  #[arg(long = "service-type", value_name = "LABEL")]
  pub service_types: Vec<ServiceType>,

  /// Opening-hours label (weekdays, weekends, evenings, 24/7). Repeatable.
  #[arg(long, value_name = "LABEL")]
  pub availability: Vec<Availability>,

  /// Accessibility feature label. Repeatable.
  #[arg(long, value_name = "LABEL")]
  pub accessibility: Vec<AccessibilityFeature>,

  /// Supported language. Repeatable.
  #[arg(long = "language", value_name = "LABEL")]
  pub languages: Vec<Language>,

  /// relevance, name, rating or recent.
  #[arg(long, default_value = "relevance", value_parser = parse_sort)]
  pub sort: SortKey,

  /// Resource id to compare side by side. Repeat for up to three.
  #[arg(long = "compare", value_name = "ID")]
  pub compare: Vec<String>,
}

impl ResourceArgs {
  pub fn criteria(&self) -> FilterCriteria {
    FilterCriteria {
      search:        self.search.clone().unwrap_or_default(),
      category:      self.category,
      service_types: self.service_types.iter().copied().collect(),
      availability:  self.availability.iter().copied().collect(),
      accessibility: self.accessibility.iter().copied().collect(),
      languages:     self.languages.iter().copied().collect(),
      sort:          self.sort,
    }
  }

  pub fn compared_ids(&self) -> impl Iterator<Item = ResourceId> + '_ {
    self.compare.iter().map(|id| ResourceId::new(id.trim()))
  }
}

fn parse_sort(s: &str) -> Result<SortKey, String> {
  let key = SortKey::parse(s).map_err(|e| e.to_string())?;
  if !key.is_supported() {
    return Err(format!("sorting by {key} is not supported yet"));
  }
  Ok(key)
}

#[cfg(test)]
mod tests {
  use clap::Parser;
  use hub_core::vocabulary::Category;

  use super::*;

  #[derive(Parser)]
  struct Cli {
    #[command(flatten)]
    args: ResourceArgs,
  }

  fn parse(argv: &[&str]) -> Result<ResourceArgs, clap::Error> {
    Cli::try_parse_from(std::iter::once("hub").chain(argv.iter().copied())).map(|c| c.args)
  }

  #[test]
  fn defaults_are_inactive() {
    let criteria = parse(&[]).unwrap().criteria();
    assert_eq!(criteria, FilterCriteria::default());
    assert!(!criteria.has_filters());
  }

  #[test]
  fn labels_map_onto_sets() {
    let args = parse(&[
      "--search",
      "food",
      "--category",
      "Food Assistance",
      "--service-type",
      "sliding-scale",
      "--service-type",
      "free",
      "--language",
      "spanish",
      "--sort",
      "rating",
      "--compare",
      "1",
      "--compare",
      "2",
    ])
    .unwrap();
    let criteria = args.criteria();
    assert_eq!(criteria.category, CategoryFilter::Only(Category::FoodAssistance));
    assert_eq!(
      criteria.service_types,
      [ServiceType::Free, ServiceType::SlidingScale].into()
    );
    assert_eq!(criteria.languages, [Language::Spanish].into());
    assert_eq!(criteria.sort, SortKey::Rating);
    assert_eq!(args.compared_ids().count(), 2);
  }

  #[test]
  fn distance_sort_is_rejected() {
    assert!(parse(&["--sort", "distance"]).is_err());
    assert!(parse(&["--sort", "nearest"]).is_err());
    assert_eq!(parse(&["--sort", "recency"]).unwrap().sort, SortKey::Recent);
  }

  #[test]
  fn unknown_category_is_rejected() {
    assert!(parse(&["--category", "Bowling"]).is_err());
  }
}
