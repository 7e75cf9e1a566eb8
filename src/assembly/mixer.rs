//! Combinatorial assembly of composite characters
//!
//! The search runs over a FIFO queue of partial composites. Each step takes
//! the first unbound part type of a partial (canonical order) and branches
//! once per candidate part, placing that part at every anchor of the type.
//! Every branch owns a clone of its tree, so siblings never share state.
//!
//! With symmetry enforced, every slot of one category (arm1 and arm2, leg1
//! and leg2) binds the same part. Anchors sharing one type (both eyes) are
//! always filled by one part, since they are placed in a single step.

use std::collections::VecDeque;

use crate::assembly::placer::Placer;
use crate::assembly::types::{Binding, Body, BodyPart, CompositeCharacter, PartType};
use crate::config::MixerConfig;
use crate::geometry::{apply, Transformation};
use crate::shape::Group;

/// A composite under construction
#[derive(Debug, Clone)]
struct Partial {
    body: usize,
    /// Bound slots as (type, index into parts)
    bound: Vec<(PartType, usize)>,
    tree: Group,
}

impl Partial {
    fn part_for_category(&self, part_type: PartType) -> Option<usize> {
        self.bound
            .iter()
            .find(|(t, _)| t.category() == part_type.category())
            .map(|(_, index)| *index)
    }
}

/// Enumerates every composite of a set of bodies and parts
pub struct Mixer<'a> {
    bodies: &'a [Body],
    parts: &'a [BodyPart],
    config: &'a MixerConfig,
}

impl<'a> Mixer<'a> {
    pub fn new(bodies: &'a [Body], parts: &'a [BodyPart], config: &'a MixerConfig) -> Self {
        Self {
            bodies,
            parts,
            config,
        }
    }

    /// Run the search to completion
    ///
    /// Only the set of results is meaningful, not their order.
    pub fn run(&self) -> Vec<CompositeCharacter> {
        let placers: Vec<Placer<'_>> = self
            .bodies
            .iter()
            .map(|body| Placer::new(body, self.config))
            .collect();
        let required: Vec<Vec<PartType>> = self.bodies.iter().map(Body::required_types).collect();

        let mut queue = VecDeque::new();
        for (index, body) in self.bodies.iter().enumerate() {
            if body.anchors.is_empty() {
                tracing::warn!(body = %body.id, "body has no anchors, skipping");
                continue;
            }
            // The identity transform leaves every path absolute
            let seed = Partial {
                body: index,
                bound: Vec::new(),
                tree: apply(&body.tree, &Transformation::default()),
            };
            self.expand(&seed, required[index][0], &placers[index], &mut queue);
        }

        let mut composites = Vec::new();
        while let Some(partial) = queue.pop_front() {
            let next = required[partial.body]
                .iter()
                .copied()
                .find(|t| !partial.bound.iter().any(|(bound, _)| bound == t));

            match next {
                Some(part_type) => {
                    self.expand(&partial, part_type, &placers[partial.body], &mut queue)
                }
                None => composites.push(self.finish(partial)),
            }
        }

        tracing::debug!(count = composites.len(), "assembly finished");
        composites
    }

    /// Parts that may fill a slot of `part_type` in `partial`
    fn candidates(&self, partial: &Partial, part_type: PartType) -> Vec<usize> {
        if self.config.enforce_symmetry {
            if let Some(index) = partial.part_for_category(part_type) {
                return vec![index];
            }
        }
        self.parts
            .iter()
            .enumerate()
            .filter(|(_, part)| part.part_type.category() == part_type.category())
            .map(|(index, _)| index)
            .collect()
    }

    fn expand(
        &self,
        partial: &Partial,
        part_type: PartType,
        placer: &Placer<'_>,
        queue: &mut VecDeque<Partial>,
    ) {
        let body = &self.bodies[partial.body];
        let candidates = self.candidates(partial, part_type);
        if candidates.is_empty() {
            tracing::debug!(body = %body.id, %part_type, "no candidate parts, dropping branch");
            return;
        }

        for index in candidates {
            let part = &self.parts[index];
            let tree = body
                .anchors_of(part_type)
                .enumerate()
                .fold(partial.tree.clone(), |tree, (ordinal, anchor)| {
                    placer.place(&tree, part, anchor, ordinal)
                });

            let mut bound = partial.bound.clone();
            bound.push((part_type, index));
            tracing::trace!(body = %body.id, %part_type, part = %part.id, "branch");
            queue.push_back(Partial {
                body: partial.body,
                bound,
                tree,
            });
        }
    }

    fn finish(&self, partial: Partial) -> CompositeCharacter {
        let mut bound = partial.bound;
        bound.sort_by_key(|(t, _)| *t);
        CompositeCharacter {
            body_id: self.bodies[partial.body].id.clone(),
            bindings: bound
                .into_iter()
                .map(|(part_type, index)| Binding {
                    part_type,
                    part_id: self.parts[index].id.clone(),
                })
                .collect(),
            tree: partial.tree,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::types::Anchor;
    use crate::geometry::Point;
    use crate::shape::PathElement;
    use std::collections::HashSet;

    fn full_body(id: &str) -> Body {
        let tree = Group::new(id, "body").with_path(
            PathElement::parse("outline", "", "M -10 -10 L 10 -10 L 10 10 L -10 10 Z").unwrap(),
        );
        Body::new(
            id,
            tree,
            vec![
                Anchor::new(PartType::Eye, Point::new(-4.0, -10.0)),
                Anchor::new(PartType::Eye, Point::new(4.0, -10.0)),
                Anchor::new(PartType::Mouth, Point::new(0.0, -10.0)),
                Anchor::new(PartType::Arm1, Point::new(10.0, 0.0)),
                Anchor::new(PartType::Arm2, Point::new(-10.0, 0.0)),
                Anchor::new(PartType::Leg1, Point::new(-5.0, 10.0)),
                Anchor::new(PartType::Leg2, Point::new(5.0, 10.0)),
            ],
        )
    }

    fn part(id: &str, part_type: PartType) -> BodyPart {
        let tree = Group::new(id, part_type.as_str())
            .with_path(PathElement::parse("p", "", "M 0 0 L 0 -2").unwrap());
        BodyPart::new(id, part_type, tree)
    }

    /// 2 eyes, 1 mouth, 3 arms, 2 legs
    fn library() -> Vec<BodyPart> {
        vec![
            part("eye-a", PartType::Eye),
            part("eye-b", PartType::Eye),
            part("mouth-a", PartType::Mouth),
            part("arm-a", PartType::Arm1),
            part("arm-b", PartType::Arm1),
            part("arm-c", PartType::Arm2),
            part("leg-a", PartType::Leg1),
            part("leg-b", PartType::Leg2),
        ]
    }

    #[test]
    fn test_symmetric_count() {
        let bodies = vec![full_body("blob")];
        let parts = library();
        let config = MixerConfig::default();
        let composites = Mixer::new(&bodies, &parts, &config).run();
        assert_eq!(composites.len(), 2 * 1 * 3 * 2);

        for c in &composites {
            assert_eq!(c.part_for(PartType::Arm1), c.part_for(PartType::Arm2));
            assert_eq!(c.part_for(PartType::Leg1), c.part_for(PartType::Leg2));
            assert_eq!(c.bindings.len(), PartType::ALL.len());
        }
        let labels: HashSet<String> = composites.iter().map(CompositeCharacter::label).collect();
        assert_eq!(labels.len(), composites.len());
    }

    #[test]
    fn test_free_count_without_symmetry() {
        let bodies = vec![full_body("blob")];
        let parts = library();
        let config = MixerConfig::default().with_symmetry(false);
        let composites = Mixer::new(&bodies, &parts, &config).run();
        assert_eq!(composites.len(), 2 * 1 * (3 * 3) * (2 * 2));
    }

    #[test]
    fn test_every_anchor_gets_a_part() {
        let bodies = vec![full_body("blob")];
        let parts = library();
        let config = MixerConfig::default();
        let composites = Mixer::new(&bodies, &parts, &config).run();
        // Seven anchors, one placed group each
        for c in &composites {
            assert_eq!(c.tree.groups.len(), 7);
        }
        // The body itself is untouched
        assert!(bodies[0].tree.groups.is_empty());
    }

    #[test]
    fn test_tree_labels_match_bindings() {
        let bodies = vec![full_body("blob")];
        let parts = library();
        for symmetry in [true, false] {
            let config = MixerConfig::default().with_symmetry(symmetry);
            for c in Mixer::new(&bodies, &parts, &config).run() {
                for binding in &c.bindings {
                    let slots = bodies[0].anchors_of(binding.part_type).count();
                    let placed: Vec<&Group> = c
                        .tree
                        .groups
                        .iter()
                        .filter(|g| g.label == binding.part_type.as_str())
                        .collect();
                    assert_eq!(placed.len(), slots, "{} in {}", binding.part_type, c.label());
                    assert!(placed.iter().all(|g| g.id.starts_with(&binding.part_id)));
                }
            }
        }
    }

    #[test]
    fn test_shared_slot_type_binds_one_part() {
        let bodies = vec![full_body("blob")];
        let parts = library();
        let config = MixerConfig::default().with_symmetry(false);
        for c in Mixer::new(&bodies, &parts, &config).run() {
            let eyes: Vec<&str> = c
                .tree
                .groups
                .iter()
                .filter(|g| g.label == "eye")
                .map(|g| g.id.as_str())
                .collect();
            assert_eq!(eyes.len(), 2);
            assert_eq!(eyes[0].trim_end_matches("-0"), eyes[1].trim_end_matches("-1"));
        }
    }

    #[test]
    fn test_missing_type_yields_nothing_for_that_body() {
        let bodies = vec![full_body("blob")];
        let parts: Vec<BodyPart> = library()
            .into_iter()
            .filter(|p| p.part_type != PartType::Mouth)
            .collect();
        let config = MixerConfig::default();
        assert!(Mixer::new(&bodies, &parts, &config).run().is_empty());
    }

    #[test]
    fn test_body_requiring_fewer_types() {
        let tree = Group::new("head", "body")
            .with_path(PathElement::parse("o", "", "M -5 -5 L 5 -5 L 5 5 Z").unwrap());
        let head = Body::new(
            "head",
            tree,
            vec![
                Anchor::new(PartType::Eye, Point::new(0.0, -5.0)),
                Anchor::new(PartType::Mouth, Point::new(5.0, 0.0)),
            ],
        );
        let bodies = vec![head, full_body("blob")];
        let parts = library();
        let config = MixerConfig::default();
        let composites = Mixer::new(&bodies, &parts, &config).run();
        let heads = composites.iter().filter(|c| c.body_id == "head").count();
        assert_eq!(heads, 2);
        assert_eq!(composites.len(), 2 + 12);
    }

    #[test]
    fn test_anchorless_body_yields_nothing() {
        let bodies = vec![Body::new("bare", Group::default(), Vec::new())];
        let parts = library();
        let config = MixerConfig::default();
        assert!(Mixer::new(&bodies, &parts, &config).run().is_empty());
    }
}
