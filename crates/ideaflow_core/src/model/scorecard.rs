//! Scorecard vocabulary and axis aggregation.
//!
//! # Responsibility
//! - Define the closed set of assessment dimensions and their axis membership.
//! - Define the ordered score levels shared by both axes.
//! - Compute the Value/Feasibility axis aggregates.
//!
//! # Invariants
//! - Exactly seven dimensions exist; four on Value, three on Feasibility.
//! - Axis aggregation is deterministic and monotonic in every dimension.
//! - Aggregation is a pure function with no side effects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One of the seven fixed criteria used to rate an idea.
///
/// The enumeration is closed: a dimension outside this set cannot be
/// constructed, so completeness checks are exhaustive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDimension {
    BusinessGrowth,
    CostEfficiency,
    BusinessResilience,
    BusinessAgility,
    TechnicalFeasibility,
    InternalReadiness,
    ExternalReadiness,
}

impl ScoreDimension {
    /// Canonical ordered list of all dimensions, Value axis first.
    pub const ALL: [ScoreDimension; 7] = [
        Self::BusinessGrowth,
        Self::CostEfficiency,
        Self::BusinessResilience,
        Self::BusinessAgility,
        Self::TechnicalFeasibility,
        Self::InternalReadiness,
        Self::ExternalReadiness,
    ];

    /// Stable string id used in storage and wire payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BusinessGrowth => "business_growth",
            Self::CostEfficiency => "cost_efficiency",
            Self::BusinessResilience => "business_resilience",
            Self::BusinessAgility => "business_agility",
            Self::TechnicalFeasibility => "technical_feasibility",
            Self::InternalReadiness => "internal_readiness",
            Self::ExternalReadiness => "external_readiness",
        }
    }

    /// Parses a dimension from its stable string id.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "business_growth" => Some(Self::BusinessGrowth),
            "cost_efficiency" => Some(Self::CostEfficiency),
            "business_resilience" => Some(Self::BusinessResilience),
            "business_agility" => Some(Self::BusinessAgility),
            "technical_feasibility" => Some(Self::TechnicalFeasibility),
            "internal_readiness" => Some(Self::InternalReadiness),
            "external_readiness" => Some(Self::ExternalReadiness),
            _ => None,
        }
    }

    /// The axis this dimension aggregates into.
    pub fn axis(self) -> Axis {
        match self {
            Self::BusinessGrowth
            | Self::CostEfficiency
            | Self::BusinessResilience
            | Self::BusinessAgility => Axis::Value,
            Self::TechnicalFeasibility | Self::InternalReadiness | Self::ExternalReadiness => {
                Axis::Feasibility
            }
        }
    }

    /// User-facing label for presentation collaborators.
    pub fn label(self) -> &'static str {
        match self {
            Self::BusinessGrowth => "Business growth",
            Self::CostEfficiency => "Cost efficiency",
            Self::BusinessResilience => "Business resilience",
            Self::BusinessAgility => "Business agility",
            Self::TechnicalFeasibility => "Technical feasibility",
            Self::InternalReadiness => "Internal readiness",
            Self::ExternalReadiness => "External readiness",
        }
    }
}

/// One of the two aggregates computed from the dimension scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Value,
    Feasibility,
}

impl Axis {
    /// Canonical ordered list of dimensions belonging to this axis.
    pub fn dimensions(self) -> &'static [ScoreDimension] {
        match self {
            Self::Value => &[
                ScoreDimension::BusinessGrowth,
                ScoreDimension::CostEfficiency,
                ScoreDimension::BusinessResilience,
                ScoreDimension::BusinessAgility,
            ],
            Self::Feasibility => &[
                ScoreDimension::TechnicalFeasibility,
                ScoreDimension::InternalReadiness,
                ScoreDimension::ExternalReadiness,
            ],
        }
    }
}

/// Ordered discrete rating applied to one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLevel {
    Low,
    Medium,
    High,
}

impl ScoreLevel {
    /// Stable string id used in storage and wire payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a level from its stable string id.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Numeric weight used by axis aggregation.
    pub fn weight(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

/// The two axis aggregates for one complete scorecard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScores {
    /// Mean level weight over the four Value dimensions.
    pub value: f64,
    /// Mean level weight over the three Feasibility dimensions.
    pub feasibility: f64,
}

/// Computes both axis aggregates from a complete dimension mapping.
///
/// Each axis score is the arithmetic mean of its dimensions' level weights.
/// Returns `None` when any of the seven dimensions is missing; callers that
/// hold an [`AssessmentRecord`](crate::model::draft::AssessmentRecord) can
/// rely on completeness and unwrap via `AssessmentRecord::axis_scores`.
pub fn axis_scores(scores: &BTreeMap<ScoreDimension, ScoreLevel>) -> Option<AxisScores> {
    Some(AxisScores {
        value: axis_mean(Axis::Value, scores)?,
        feasibility: axis_mean(Axis::Feasibility, scores)?,
    })
}

fn axis_mean(axis: Axis, scores: &BTreeMap<ScoreDimension, ScoreLevel>) -> Option<f64> {
    let dimensions = axis.dimensions();
    let mut total = 0u32;
    for dimension in dimensions {
        total += u32::from(scores.get(dimension)?.weight());
    }
    Some(f64::from(total) / dimensions.len() as f64)
}
