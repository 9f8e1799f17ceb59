//! JSON snapshot and restore of a [`CompassArc`].
//!
//! The wire shape is a flat record with one nullable slot per point plus the
//! angle accumulators, so an undo/history layer can store and restore an arc
//! without knowing about [`Phase`]. Older snapshots carried a single combined
//! `accumulatedAngle`; it is accepted when `accumulatedAngleAbs` is absent.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::arc::{ArcError, ArcState, CompassArc, Phase, Sweep};
use crate::point::Point;

/// Flat, serializable view of a compass arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcSnapshot {
    pub center_point: Option<Point>,
    pub radius_point: Option<Point>,
    pub current_point: Option<Point>,
    pub state: ArcState,
    pub last_angle: Option<f64>,
    #[serde(default)]
    pub net_angle: f64,
    pub accumulated_angle_abs: Option<f64>,
    /// Legacy combined accumulator; read but never written.
    #[serde(default, rename = "accumulatedAngle", skip_serializing)]
    pub legacy_accumulated_angle: Option<f64>,
    pub preview_point: Option<Point>,
}

impl From<&CompassArc> for ArcSnapshot {
    fn from(arc: &CompassArc) -> Self {
        let sweep = arc.sweep();
        Self {
            center_point: arc.center_point(),
            radius_point: arc.radius_point(),
            current_point: arc.current_point(),
            state: arc.state(),
            last_angle: sweep.map(|s| s.last_angle),
            net_angle: sweep.map_or(0.0, |s| s.net_angle),
            accumulated_angle_abs: Some(sweep.map_or(0.0, |s| s.accumulated_abs)),
            legacy_accumulated_angle: None,
            preview_point: arc.preview_point(),
        }
    }
}

impl From<CompassArc> for ArcSnapshot {
    fn from(arc: CompassArc) -> Self {
        Self::from(&arc)
    }
}

impl TryFrom<ArcSnapshot> for CompassArc {
    type Error = ArcError;

    fn try_from(snap: ArcSnapshot) -> Result<Self, Self::Error> {
        let phase = match snap.state {
            ArcState::Idle => Phase::Idle,
            ArcState::CenterSet => Phase::CenterSet { center: required(snap.center_point, "centerPoint", snap.state)? },
            ArcState::RadiusSet => Phase::RadiusSet {
                center: required(snap.center_point, "centerPoint", snap.state)?,
                radius_point: required(snap.radius_point, "radiusPoint", snap.state)?,
            },
            ArcState::Drawing => {
                let center = required(snap.center_point, "centerPoint", snap.state)?;
                let radius_point = required(snap.radius_point, "radiusPoint", snap.state)?;
                let current_point = snap.current_point.unwrap_or(radius_point);
                Phase::Drawing(Sweep {
                    center,
                    radius_point,
                    current_point,
                    last_angle: snap.last_angle.unwrap_or_else(|| center.angle_to(current_point)),
                    net_angle: snap.net_angle,
                    accumulated_abs: snap
                        .accumulated_angle_abs
                        .or(snap.legacy_accumulated_angle)
                        .unwrap_or(0.0),
                })
            }
        };
        Ok(CompassArc::from_parts(phase, snap.preview_point))
    }
}

fn required(point: Option<Point>, field: &str, state: ArcState) -> Result<Point, ArcError> {
    point.ok_or_else(|| ArcError::InvalidSnapshot(format!("{state} snapshot is missing {field}")))
}

impl CompassArc {
    /// Snapshot the arc as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        // A record of options and floats always serializes; non-finite floats become null.
        serde_json::to_value(ArcSnapshot::from(self)).unwrap_or_default()
    }

    /// Restore an arc from a JSON object produced by [`CompassArc::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`ArcError::Json`] when the value does not have the snapshot
    /// shape and [`ArcError::InvalidSnapshot`] when the named state lacks a
    /// required point.
    pub fn from_json(data: &Value) -> Result<Self, ArcError> {
        let snap = ArcSnapshot::deserialize(data)?;
        Self::try_from(snap)
    }

    /// Restore an arc from JSON text.
    ///
    /// # Errors
    ///
    /// Same as [`CompassArc::from_json`].
    pub fn from_json_str(raw: &str) -> Result<Self, ArcError> {
        let snap: ArcSnapshot = serde_json::from_str(raw)?;
        Self::try_from(snap)
    }
}
