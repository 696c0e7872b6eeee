//! Asset types: the things a user can favourite.
//!
//! An asset is one of a closed set of variants. The variant is chosen at
//! creation and never changes; updates carry a change set for the same
//! variant or are rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{Entity, Error, Result};

// ─── Variant tag ─────────────────────────────────────────────────────────────

/// The discriminant of an [`AssetBody`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::AsRefStr,
  strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AssetKind {
  Chart,
  Insight,
  Audience,
}

impl AssetKind {
  /// Parse a caller-supplied tag, e.g. `"chart"` or `"Insight"`.
  pub fn parse(tag: &str) -> Result<Self> {
    tag
      .trim()
      .parse()
      .map_err(|_| Error::UnknownAssetType(tag.to_owned()))
  }
}

// ─── Variant payloads ────────────────────────────────────────────────────────

/// One `(x, y)` point of a chart series. Either coordinate may be a number,
/// a string label, or any other JSON scalar.
pub type DataPoint = (Value, Value);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBody {
  pub title:  String,
  pub x_axis: String,
  pub y_axis: String,
  #[serde(default)]
  pub data:   Vec<DataPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightBody {
  pub text: String,
}

/// A demographic segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceBody {
  pub gender:               String,
  pub birth_country:        String,
  pub age_group:            String,
  /// Daily hours spent on social media.
  #[serde(default)]
  pub hours_on_social:      u32,
  #[serde(default)]
  pub purchases_last_month: u32,
}

/// The variant-specific part of an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum AssetBody {
  Chart(ChartBody),
  Insight(InsightBody),
  Audience(AudienceBody),
}

impl AssetBody {
  pub fn kind(&self) -> AssetKind {
    match self {
      Self::Chart(_) => AssetKind::Chart,
      Self::Insight(_) => AssetKind::Insight,
      Self::Audience(_) => AssetKind::Audience,
    }
  }

  /// Decode a loosely typed payload whose variant is named by `tag`.
  ///
  /// An unrecognised tag fails with [`Error::UnknownAssetType`] before the
  /// payload is looked at.
  pub fn from_parts(tag: &str, data: Value) -> Result<Self> {
    let kind = AssetKind::parse(tag)?;
    let wrapped = serde_json::json!({ "type": kind.as_ref(), "data": data });
    Ok(serde_json::from_value(wrapped)?)
  }

  pub(crate) fn validate(&self) -> Result<()> {
    match self {
      Self::Chart(c) => {
        require("chart title", &c.title)?;
        require("chart x axis", &c.x_axis)?;
        require("chart y axis", &c.y_axis)
      }
      Self::Insight(i) => require("insight text", &i.text),
      Self::Audience(a) => {
        require("audience gender", &a.gender)?;
        require("audience birth country", &a.birth_country)?;
        require("audience age group", &a.age_group)
      }
    }
  }

  /// Merge `changes` into this body. Fails without touching `self` when the
  /// change set targets a different variant.
  pub(crate) fn apply(&mut self, changes: AssetChanges) -> Result<()> {
    match (self, changes) {
      (Self::Chart(body), AssetChanges::Chart(c)) => {
        set(&mut body.title, c.title);
        set(&mut body.x_axis, c.x_axis);
        set(&mut body.y_axis, c.y_axis);
        set(&mut body.data, c.data);
      }
      (Self::Insight(body), AssetChanges::Insight(c)) => {
        set(&mut body.text, c.text);
      }
      (Self::Audience(body), AssetChanges::Audience(c)) => {
        set(&mut body.gender, c.gender);
        set(&mut body.birth_country, c.birth_country);
        set(&mut body.age_group, c.age_group);
        set(&mut body.hours_on_social, c.hours_on_social);
        set(&mut body.purchases_last_month, c.purchases_last_month);
      }
      (existing, requested) => {
        return Err(Error::AssetTypeMismatch {
          existing:  existing.kind(),
          requested: requested.kind(),
        });
      }
    }
    Ok(())
  }
}

fn require(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::invalid(format!("{field} must not be blank")));
  }
  Ok(())
}

fn set<T>(slot: &mut T, value: Option<T>) {
  if let Some(value) = value {
    *slot = value;
  }
}

// ─── Asset ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
  pub asset_id:    Uuid,
  pub description: String,
  pub body:        AssetBody,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

impl Asset {
  pub fn kind(&self) -> AssetKind { self.body.kind() }
}

impl Entity for Asset {
  fn id(&self) -> Uuid { self.asset_id }

  fn created_at(&self) -> DateTime<Utc> { self.created_at }
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to [`crate::service::AssetService::create_asset`]. The identifier
/// and timestamps are always assigned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAsset {
  #[serde(default)]
  pub description: String,
  pub body:        AssetBody,
}

impl NewAsset {
  pub fn new(description: impl Into<String>, body: AssetBody) -> Self {
    Self {
      description: description.into(),
      body,
    }
  }

  pub fn insight(description: impl Into<String>, text: impl Into<String>) -> Self {
    Self::new(description, AssetBody::Insight(InsightBody { text: text.into() }))
  }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChartChanges {
  pub title:  Option<String>,
  pub x_axis: Option<String>,
  pub y_axis: Option<String>,
  pub data:   Option<Vec<DataPoint>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InsightChanges {
  pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AudienceChanges {
  pub gender:               Option<String>,
  pub birth_country:        Option<String>,
  pub age_group:            Option<String>,
  pub hours_on_social:      Option<u32>,
  pub purchases_last_month: Option<u32>,
}

/// A partial change to the variant-specific fields of an asset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum AssetChanges {
  Chart(ChartChanges),
  Insight(InsightChanges),
  Audience(AudienceChanges),
}

impl AssetChanges {
  pub fn kind(&self) -> AssetKind {
    match self {
      Self::Chart(_) => AssetKind::Chart,
      Self::Insight(_) => AssetKind::Insight,
      Self::Audience(_) => AssetKind::Audience,
    }
  }

  /// Decode a loosely typed change set, as [`AssetBody::from_parts`] does.
  pub fn from_parts(tag: &str, data: Value) -> Result<Self> {
    let kind = AssetKind::parse(tag)?;
    let wrapped = serde_json::json!({ "type": kind.as_ref(), "data": data });
    Ok(serde_json::from_value(wrapped)?)
  }
}

/// Input to [`crate::service::AssetService::update_asset`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetUpdate {
  pub description: Option<String>,
  pub changes:     Option<AssetChanges>,
}

impl AssetUpdate {
  pub(crate) fn apply(self, asset: &mut Asset, now: DateTime<Utc>) -> Result<()> {
    if let Some(changes) = self.changes {
      asset.body.apply(changes)?;
      asset.body.validate()?;
    }
    if let Some(description) = self.description {
      asset.description = description;
    }
    asset.updated_at = now;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn kind_parses_case_insensitively() {
    assert_eq!(AssetKind::parse("chart").unwrap(), AssetKind::Chart);
    assert_eq!(AssetKind::parse(" Insight ").unwrap(), AssetKind::Insight);
    assert_eq!(AssetKind::parse("AUDIENCE").unwrap(), AssetKind::Audience);
    assert!(matches!(
      AssetKind::parse("video"),
      Err(Error::UnknownAssetType(t)) if t == "video"
    ));
  }

  #[test]
  fn kind_display_matches_body_tag() {
    for kind in AssetKind::iter() {
      let tag = kind.to_string();
      let body = match kind {
        AssetKind::Chart => json!({ "title": "t", "x_axis": "x", "y_axis": "y" }),
        AssetKind::Insight => json!({ "text": "t" }),
        AssetKind::Audience => json!({
          "gender": "f", "birth_country": "GR", "age_group": "25-34"
        }),
      };
      assert_eq!(AssetBody::from_parts(&tag, body).unwrap().kind(), kind);
    }
  }

  #[test]
  fn from_parts_decodes_chart_series() {
    let body = AssetBody::from_parts(
      "chart",
      json!({
        "title": "Sales",
        "x_axis": "month",
        "y_axis": "units",
        "data": [["jan", 3], ["feb", 5.5]]
      }),
    )
    .unwrap();
    let AssetBody::Chart(chart) = body else { panic!("expected chart") };
    assert_eq!(chart.data.len(), 2);
    assert_eq!(chart.data[0], (json!("jan"), json!(3)));
  }

  #[test]
  fn from_parts_rejects_unknown_tag_and_bad_payload() {
    assert!(matches!(
      AssetBody::from_parts("podcast", json!({})),
      Err(Error::UnknownAssetType(_))
    ));
    assert!(matches!(
      AssetBody::from_parts("insight", json!({ "txt": "typo" })),
      Err(Error::Serialization(_))
    ));
  }

  #[test]
  fn apply_rejects_variant_change() {
    let mut body = AssetBody::Insight(InsightBody { text: "hello".into() });
    let err = body
      .apply(AssetChanges::Chart(ChartChanges {
        title: Some("nope".into()),
        ..Default::default()
      }))
      .unwrap_err();
    assert!(matches!(
      err,
      Error::AssetTypeMismatch {
        existing:  AssetKind::Insight,
        requested: AssetKind::Chart,
      }
    ));
    assert_eq!(body, AssetBody::Insight(InsightBody { text: "hello".into() }));
  }

  #[test]
  fn apply_merges_only_present_fields() {
    let mut body = AssetBody::Audience(AudienceBody {
      gender:               "f".into(),
      birth_country:        "GR".into(),
      age_group:            "25-34".into(),
      hours_on_social:      2,
      purchases_last_month: 1,
    });
    body
      .apply(AssetChanges::Audience(AudienceChanges {
        hours_on_social: Some(5),
        ..Default::default()
      }))
      .unwrap();
    let AssetBody::Audience(a) = body else { panic!("expected audience") };
    assert_eq!(a.hours_on_social, 5);
    assert_eq!(a.purchases_last_month, 1);
    assert_eq!(a.birth_country, "GR");
  }
}
