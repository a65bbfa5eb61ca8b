//! Multi-stage recipe search
//!
//! Stages, in order:
//! 1. Exact match: the individually closest pigment is returned alone when
//!    its ΔE is below the exact-match threshold.
//! 2. Pairs: every unordered pair (self-pairs included) of the 10 closest
//!    pigments, swept at 1/40 ratio steps.
//! 3. Triples: every 3-combination of the 6 closest pigments at five fixed
//!    splits.
//! 4. Refinement: the best pair/triple blended with the white reference
//!    (2.5%..20%) and, separately, with the black reference (2.5%..15%).
//!
//! A single running best is replaced only by a strictly smaller ΔE, so the
//! first candidate found at a given distance wins. Enumeration order (outer
//! pigment, inner pigment, ratio) is therefore part of the observable
//! behavior and must not be parallelized or reordered.

use tracing::{debug, trace};

use super::{MatchKind, RecipeMatch, RecipeNormalizer};
use crate::catalog::{Pigment, PigmentRole, RecipeEntry};
use crate::color::{ColorConverter, Lab, Rgb, SubtractiveMixer};
use crate::config::MatchConfig;
use crate::accuracy_from_distance;

/// Indexed weights into the eligible pigment list
type Parts = Vec<(usize, f64)>;

#[derive(Debug, Clone)]
struct Candidate {
    parts: Parts,
    mixed: Rgb,
    distance: f64,
    kind: MatchKind,
}

/// Per-call search inputs
struct SearchContext<'a, 'p> {
    pigments: &'a [&'p Pigment],
    target_lab: Lab,
}

/// Pigment index and its individual ΔE to the target
#[derive(Debug, Clone, Copy)]
struct Scored {
    index: usize,
    distance: f64,
}

/// Recipe search engine
#[derive(Debug, Clone)]
pub struct RecipeSearch<'c> {
    config: &'c MatchConfig,
    converter: ColorConverter,
    mixer: SubtractiveMixer,
    normalizer: RecipeNormalizer,
}

impl<'c> RecipeSearch<'c> {
    /// Create a search engine over the given configuration
    pub fn new(config: &'c MatchConfig) -> Self {
        Self {
            config,
            converter: ColorConverter::new(),
            mixer: SubtractiveMixer::new(),
            normalizer: RecipeNormalizer::with_config(&config.normalization),
        }
    }

    /// Find the best recipe for `target` from the eligible pigments
    ///
    /// Returns `None` only when `pigments` is empty.
    pub fn search(&self, target: Rgb, pigments: &[&Pigment]) -> Option<RecipeMatch> {
        let ctx = SearchContext {
            pigments,
            target_lab: self.converter.rgb_to_lab(target),
        };

        let ranked = self.rank_individually(&ctx);
        let closest = *ranked.first()?;

        if closest.distance < self.config.exact_match_threshold {
            debug!(
                pigment = %pigments[closest.index].id,
                distance = closest.distance,
                "exact match"
            );
            let candidate = Candidate {
                parts: vec![(closest.index, 1.0)],
                mixed: pigments[closest.index].color,
                distance: closest.distance,
                kind: MatchKind::Exact,
            };
            return Some(self.finish(&ctx, candidate));
        }

        let mut best = None;
        self.search_pairs(&ctx, &ranked, &mut best);
        debug!(distance = best_distance(&best), "pair search done");

        self.search_triples(&ctx, &ranked, &mut best);
        debug!(distance = best_distance(&best), "triple search done");

        self.refine(&ctx, &mut best);

        best.map(|candidate| self.finish(&ctx, candidate))
    }

    /// Every pigment's ΔE to the target, ascending; ties keep catalog order
    fn rank_individually(&self, ctx: &SearchContext<'_, '_>) -> Vec<Scored> {
        let mut ranked: Vec<Scored> = ctx
            .pigments
            .iter()
            .enumerate()
            .map(|(index, pigment)| Scored {
                index,
                distance: self
                    .converter
                    .delta_e(ctx.target_lab, self.converter.rgb_to_lab(pigment.color)),
            })
            .collect();
        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        ranked
    }

    fn search_pairs(&self, ctx: &SearchContext<'_, '_>, ranked: &[Scored], best: &mut Option<Candidate>) {
        let shortlist = shortlist(ranked, self.config.search.pair_shortlist);
        let steps = self.config.search.pair_ratio_steps;
        debug!(shortlist = shortlist.len(), steps, "searching pairs");

        for (i, &first) in shortlist.iter().enumerate() {
            for &second in &shortlist[i..] {
                for step in 1..steps {
                    let ratio = step as f64 / steps as f64;
                    self.offer(ctx, best, &[(first, ratio), (second, 1.0 - ratio)], MatchKind::Pair);
                }
            }
        }
    }

    fn search_triples(&self, ctx: &SearchContext<'_, '_>, ranked: &[Scored], best: &mut Option<Candidate>) {
        let shortlist = shortlist(ranked, self.config.search.triple_shortlist);
        debug!(shortlist = shortlist.len(), "searching triples");

        for (i, &a) in shortlist.iter().enumerate() {
            for (j, &b) in shortlist.iter().enumerate().skip(i + 1) {
                for &c in &shortlist[j + 1..] {
                    for split in &self.config.search.triple_splits {
                        self.offer(
                            ctx,
                            best,
                            &[(a, split[0]), (b, split[1]), (c, split[2])],
                            MatchKind::Triple,
                        );
                    }
                }
            }
        }
    }

    /// Blend the current best with the white and black references
    ///
    /// Both references must be eligible; otherwise the step is skipped.
    /// White and black trials all start from the same base recipe.
    fn refine(&self, ctx: &SearchContext<'_, '_>, best: &mut Option<Candidate>) {
        let Some(base) = best.as_ref().map(|candidate| candidate.parts.clone()) else {
            return;
        };
        let (Some(white), Some(black)) = (
            self.reference(ctx.pigments, PigmentRole::White),
            self.reference(ctx.pigments, PigmentRole::Black),
        ) else {
            debug!("no white/black reference pigments, skipping refinement");
            return;
        };

        let search = &self.config.search;
        for (reference, steps, kind) in [
            (white, search.tint_steps, MatchKind::Tint),
            (black, search.shade_steps, MatchKind::Shade),
        ] {
            for step in 1..=steps {
                let ratio = step as f64 * search.tint_step;
                self.offer(ctx, best, &blend_with(&base, reference, ratio), kind);
            }
        }
        debug!(distance = best_distance(best), "refinement done");
    }

    /// Index of the reference pigment for `role`
    ///
    /// An explicit role tag wins over the reserved identifier convention.
    fn reference(&self, pigments: &[&Pigment], role: PigmentRole) -> Option<usize> {
        let refs = &self.config.references;
        pigments
            .iter()
            .position(|p| p.role == Some(role))
            .or_else(|| {
                pigments
                    .iter()
                    .position(|p| p.effective_role(&refs.white_id, &refs.black_id) == Some(role))
            })
    }

    /// Mix and score a candidate, keeping it if strictly better
    fn offer(
        &self,
        ctx: &SearchContext<'_, '_>,
        best: &mut Option<Candidate>,
        parts: &[(usize, f64)],
        kind: MatchKind,
    ) {
        let mixed = self
            .mixer
            .mix_weighted(parts.iter().map(|&(index, weight)| (ctx.pigments[index].color, weight)));
        let distance = self
            .converter
            .delta_e(ctx.target_lab, self.converter.rgb_to_lab(mixed));

        if best.as_ref().map_or(true, |current| distance < current.distance) {
            trace!(?kind, distance, ?parts, "new best candidate");
            *best = Some(Candidate {
                parts: parts.to_vec(),
                mixed,
                distance,
                kind,
            });
        }
    }

    fn finish(&self, ctx: &SearchContext<'_, '_>, candidate: Candidate) -> RecipeMatch {
        let entries: Vec<RecipeEntry> = candidate
            .parts
            .iter()
            .map(|&(index, parts)| RecipeEntry {
                pigment: ctx.pigments[index].clone(),
                parts,
            })
            .collect();

        RecipeMatch {
            recipe: self.normalizer.normalize(&entries),
            achieved: candidate.mixed,
            achieved_hex: self.converter.rgb_to_hex(candidate.mixed),
            accuracy: accuracy_from_distance(candidate.distance, self.config.accuracy.recipe_scale),
            distance: candidate.distance,
            kind: candidate.kind,
        }
    }
}

/// Indices of the `size` individually closest pigments
fn shortlist(ranked: &[Scored], size: usize) -> Vec<usize> {
    ranked.iter().take(size).map(|scored| scored.index).collect()
}

/// Scale `base` down to `1 - ratio` of the mix and add `reference` at `ratio`
fn blend_with(base: &[(usize, f64)], reference: usize, ratio: f64) -> Parts {
    let total: f64 = base.iter().map(|&(_, weight)| weight).sum();
    base.iter()
        .map(|&(index, weight)| (index, weight / total * (1.0 - ratio)))
        .chain(std::iter::once((reference, ratio)))
        .collect()
}

fn best_distance(best: &Option<Candidate>) -> f64 {
    best.as_ref().map_or(f64::INFINITY, |candidate| candidate.distance)
}
