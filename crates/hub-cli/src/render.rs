//! Plain-text rendering for command output.

use std::{collections::BTreeMap, fmt::Write as _};

use chrono::NaiveDate;
use hub_core::{
  event::Event,
  profile::Profile,
  resource::Resource,
  vocabulary::Category,
};
use strum::IntoEnumIterator;

/// One line per resource: id, name, category and rating.
pub fn resource_line(resource: &Resource) -> String {
  let mut line = format!(
    "{:<8} {} [{}]",
    resource.id, resource.name, resource.category
  );
  if let Some(rating) = resource.rating {
    let _ = write!(line, "  ★ {rating:.1} ({} reviews)", resource.review_count);
  }
  if resource.is_featured {
    line.push_str("  featured");
  }
  line
}

/// Indented detail lines shown under a resource.
pub fn resource_details(resource: &Resource) -> Vec<String> {
  let mut lines: Vec<String> = resource
    .contact_methods()
    .into_iter()
    .map(|(label, value)| format!("    {label}: {value}"))
    .collect();
  if let Some(hours) = &resource.hours {
    lines.push(format!("    hours: {hours}"));
  }
  if let Some(cost) = &resource.cost {
    lines.push(format!("    cost: {cost}"));
  }
  if !resource.tags.is_empty() {
    lines.push(format!("    tags: {}", resource.tags.join(", ")));
  }
  lines
}

fn join<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
  let joined: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
  if joined.is_empty() { "-".into() } else { joined.join(", ") }
}

/// Side-by-side attribute table for the compared resources.
pub fn comparison_table(resources: &[&Resource]) -> String {
  let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".into());
  let rows: Vec<(&str, Vec<String>)> = vec![
    ("Name", resources.iter().map(|r| r.name.clone()).collect()),
    ("Category", resources.iter().map(|r| r.category.to_string()).collect()),
    (
      "Rating",
      resources
        .iter()
        .map(|r| r.rating.map_or("-".into(), |v| format!("{v:.1}")))
        .collect(),
    ),
    ("Cost", resources.iter().map(|r| or_dash(&r.cost)).collect()),
    ("Hours", resources.iter().map(|r| or_dash(&r.hours)).collect()),
    ("Phone", resources.iter().map(|r| or_dash(&r.phone)).collect()),
    ("Address", resources.iter().map(|r| or_dash(&r.address)).collect()),
    (
      "Languages",
      resources.iter().map(|r| join(&r.languages)).collect(),
    ),
    (
      "Accessibility",
      resources
        .iter()
        .map(|r| join(&r.accessibility_features))
        .collect(),
    ),
  ];

  let label_width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
  let widths: Vec<usize> = (0..resources.len())
    .map(|col| {
      rows
        .iter()
        .map(|(_, cells)| cells[col].chars().count())
        .max()
        .unwrap_or(0)
    })
    .collect();

  let mut out = String::new();
  for (label, cells) in &rows {
    let _ = write!(out, "{label:<label_width$}");
    for (cell, width) in cells.iter().zip(&widths) {
      let _ = write!(out, " | {cell:<width$}");
    }
    out.push('\n');
  }
  out
}

/// Resource counts for the category bar, "All Categories" first. Categories
/// without resources are listed with zero.
pub fn category_counts(counts: &BTreeMap<Category, usize>) -> Vec<String> {
  let total: usize = counts.values().sum();
  std::iter::once(format!("{:<26} {total}", "All Categories"))
    .chain(Category::iter().map(|category| {
      let n = counts.get(&category).copied().unwrap_or(0);
      format!("{:<26} {n}", category.to_string())
    }))
    .collect()
}

pub fn event_line(event: &Event, today: NaiveDate) -> String {
  let mut line = format!("{} ", event.start_date);
  if let Some(time) = event.start_time {
    let _ = write!(line, "{} ", time.format("%H:%M"));
  }
  let _ = write!(
    line,
    "{} ({}) @ {}",
    event.title, event.kind, event.location
  );
  if event.registration_open(today) {
    match event.spots_left() {
      Some(n) => {
        let _ = write!(line, "  registration open, {n} spots left");
      }
      None => line.push_str("  registration open"),
    }
  } else if event.spots_left() == Some(0) {
    line.push_str("  full");
  }
  line
}

pub fn profile_lines(profile: &Profile) -> Vec<String> {
  let mut lines = vec![
    format!("{} ({})", profile.display_name(), profile.initials()),
    format!("email:    {}", profile.email),
    if profile.is_moderator() {
      format!("role:     {} (can review submissions)", profile.role)
    } else {
      format!("role:     {}", profile.role)
    },
  ];
  for (label, value) in [
    ("phone:   ", &profile.phone),
    ("address: ", &profile.address),
    ("bio:     ", &profile.bio),
  ] {
    if let Some(value) = value {
      lines.push(format!("{label} {value}"));
    }
  }
  lines.push(format!("joined:   {}", profile.created_at.date_naive()));
  lines
}
