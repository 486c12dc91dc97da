use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::extrude::{Extruder, TriangleMesh};
use crate::math::{Aabb2, Aabb3, BoxPoint, Vector2, Vector3};
use crate::shape::Region;

use super::composite::{Composite, LayerKind, Material, Solid};

/// Horizontal placement rule resolved after extrusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alignment {
    /// Bounding-box center moves to the origin.
    Centered,
    /// Shares the horizontal translation of another layer, keeping the
    /// relative position both had when they were drawn.
    Follow(LayerKind),
    /// Bounding-box center lands on a reference point of another layer's
    /// placed bounding box, plus `offset`.
    Anchor {
        to: LayerKind,
        at: BoxPoint,
        offset: Vector2,
    },
}

/// Everything needed to turn one logical layer into a solid.
#[derive(Debug, Clone)]
pub struct LayerPlan {
    pub kind: LayerKind,
    pub regions: Vec<Region>,
    pub depth: f64,
    /// Height of the layer's bottom face.
    pub z: f64,
    pub alignment: Alignment,
    pub material: Material,
}

impl LayerPlan {
    #[must_use]
    pub fn new(kind: LayerKind, regions: Vec<Region>, depth: f64, material: Material) -> Self {
        Self {
            kind,
            regions,
            depth,
            z: 0.0,
            alignment: Alignment::Centered,
            material,
        }
    }

    /// Places the layer's bottom at `z`.
    #[must_use]
    pub fn at(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    #[must_use]
    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Height at which a layer resting on `below_top` starts, sunk by `embed`.
#[must_use]
pub fn stack_on(below_top: f64, embed: f64) -> f64 {
    below_top - embed
}

struct Extruded {
    plan: LayerPlan,
    mesh: TriangleMesh,
    footprint: Aabb2,
}

/// Extrudes every plan and resolves horizontal alignment.
///
/// Layers without regions are skipped. `Follow` and `Anchor` targets that
/// are absent fall back to `Centered`. Centered layers are placed before
/// the layers that refer to them, while the output keeps plan order.
pub(crate) struct Assemble<'a, E> {
    plans: Vec<LayerPlan>,
    extruder: &'a E,
}

impl<'a, E: Extruder> Assemble<'a, E> {
    pub(crate) fn new(plans: Vec<LayerPlan>, extruder: &'a E) -> Self {
        Self { plans, extruder }
    }

    pub(crate) fn execute(self) -> Result<Composite> {
        let mut extruded = Vec::with_capacity(self.plans.len());
        for plan in self.plans {
            if plan.regions.is_empty() {
                debug!(layer = %plan.kind, "layer has no regions, skipped");
                continue;
            }
            let mesh = self.extruder.extrude(&plan.regions, plan.depth)?;
            let Some(footprint) = mesh.bounds().as_ref().map(Aabb3::footprint) else {
                debug!(layer = %plan.kind, "layer extruded to nothing, skipped");
                continue;
            };
            extruded.push(Extruded {
                plan,
                mesh,
                footprint,
            });
        }

        let mut shifts: HashMap<LayerKind, Vector2> = HashMap::new();
        let mut placed: Vec<Option<Vector2>> = vec![None; extruded.len()];

        for (i, layer) in extruded.iter().enumerate() {
            if layer.plan.alignment == Alignment::Centered {
                let shift = -layer.footprint.center().coords;
                shifts.entry(layer.plan.kind).or_insert(shift);
                placed[i] = Some(shift);
            }
        }
        for (i, layer) in extruded.iter().enumerate() {
            if placed[i].is_some() {
                continue;
            }
            let shift = resolve(layer, &extruded, &shifts);
            shifts.entry(layer.plan.kind).or_insert(shift);
            placed[i] = Some(shift);
        }

        let solids = extruded
            .into_iter()
            .zip(placed)
            .map(|(layer, shift)| {
                let shift = shift.unwrap_or_else(Vector2::zeros);
                Solid {
                    kind: layer.plan.kind,
                    mesh: layer.mesh,
                    placement: Vector3::new(shift.x, shift.y, layer.plan.z),
                    material: layer.plan.material,
                }
            })
            .collect();
        Ok(Composite::new(solids))
    }
}

fn resolve(layer: &Extruded, all: &[Extruded], shifts: &HashMap<LayerKind, Vector2>) -> Vector2 {
    let centered = -layer.footprint.center().coords;
    match layer.plan.alignment {
        Alignment::Centered => centered,
        Alignment::Follow(target) => shifts.get(&target).copied().unwrap_or_else(|| {
            debug!(layer = %layer.plan.kind, %target, "follow target missing, centering");
            centered
        }),
        Alignment::Anchor { to, at, offset } => {
            let target = all.iter().find(|l| l.plan.kind == to);
            match (target, shifts.get(&to)) {
                (Some(target), Some(shift)) => {
                    let anchor = target.footprint.translated(*shift).point(at) + offset;
                    anchor.coords + centered
                }
                _ => {
                    debug!(layer = %layer.plan.kind, target = %to, "anchor target missing, centering");
                    centered
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::extrude::PrismExtruder;
    use crate::math::Point2;
    use approx::assert_relative_eq;

    fn square(x0: f64, y0: f64, side: f64) -> Region {
        Region::new(
            vec![
                Point2::new(x0, y0),
                Point2::new(x0 + side, y0),
                Point2::new(x0 + side, y0 + side),
                Point2::new(x0, y0 + side),
            ],
            vec![],
        )
    }

    fn plan(kind: LayerKind, region: Region, depth: f64) -> LayerPlan {
        LayerPlan::new(kind, vec![region], depth, Material::new(kind.to_string()))
    }

    #[test]
    fn centered_layer_moves_to_origin() {
        let extruder = PrismExtruder::new();
        let composite = Assemble::new(
            vec![plan(LayerKind::Base, square(10.0, 20.0, 4.0), 2.0)],
            &extruder,
        )
        .execute()
        .unwrap();
        let b = composite.bounds().unwrap();
        assert_relative_eq!(b.min.x, -2.0, epsilon = 1e-9);
        assert_relative_eq!(b.max.y, 2.0, epsilon = 1e-9);
        assert_relative_eq!(b.max.z, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn follow_keeps_relative_offset_regardless_of_order() {
        let extruder = PrismExtruder::new();
        let plans = vec![
            plan(LayerKind::Base, square(0.0, 0.0, 10.0), 2.0).aligned(Alignment::Follow(LayerKind::Text)),
            plan(LayerKind::Text, square(2.0, 2.0, 2.0), 1.0).at(stack_on(2.0, 0.05)),
        ];
        let composite = Assemble::new(plans, &extruder).execute().unwrap();
        assert_eq!(composite.solids()[0].kind, LayerKind::Base);
        let base = composite.solid(LayerKind::Base).unwrap().bounds().unwrap();
        let text = composite.solid(LayerKind::Text).unwrap().bounds().unwrap();
        assert_relative_eq!(text.min.x - base.min.x, 2.0, epsilon = 1e-9);
        assert_relative_eq!(text.footprint().center().x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(text.min.z, 1.95, epsilon = 1e-9);
    }

    #[test]
    fn missing_follow_target_falls_back_to_centered() {
        let extruder = PrismExtruder::new();
        let plans = vec![
            plan(LayerKind::Base, square(5.0, 5.0, 2.0), 1.0).aligned(Alignment::Follow(LayerKind::Text)),
        ];
        let composite = Assemble::new(plans, &extruder).execute().unwrap();
        let b = composite.bounds().unwrap();
        assert_relative_eq!(b.footprint().center().x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn anchor_targets_placed_box_point() {
        let extruder = PrismExtruder::new();
        let plans = vec![
            plan(LayerKind::Text, square(0.0, 0.0, 10.0), 1.0),
            plan(LayerKind::Center, square(0.0, 0.0, 2.0), 1.0).aligned(Alignment::Anchor {
                to: LayerKind::Text,
                at: BoxPoint::TopLeft,
                offset: Vector2::new(-1.0, 0.0),
            }),
        ];
        let composite = Assemble::new(plans, &extruder).execute().unwrap();
        let anchored = composite.solid(LayerKind::Center).unwrap().bounds().unwrap();
        let center = anchored.footprint().center();
        assert_relative_eq!(center.x, -6.0, epsilon = 1e-9);
        assert_relative_eq!(center.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_layers_are_skipped() {
        let extruder = PrismExtruder::new();
        let plans = vec![
            plan(LayerKind::Base, square(0.0, 0.0, 1.0), 1.0),
            LayerPlan::new(LayerKind::Text, vec![], 1.0, Material::new("text")),
        ];
        let composite = Assemble::new(plans, &extruder).execute().unwrap();
        assert_eq!(composite.solids().len(), 1);
    }
}
