//! Waypoint selection policies over the distance matrix.
//!
//! Both policies operate on the candidate-list index convention: index 0 is
//! the origin, the last index the destination, everything in between a
//! waypoint candidate. The matrix is consumed directionally (`matrix[i][j]`)
//! throughout; walking distances are not assumed symmetric.

use crate::coord::Coord;
use crate::traits::PriceSource;

/// How many of the cheapest-by-proxy waypoints the combined-path search
/// permutes. Six orderings at most, independent of how many waypoints the
/// sampler discovered.
pub const SHORTLIST_LEN: usize = 3;

/// Policy A: shortest combined path through the most promising waypoints.
///
/// Waypoints are ranked by `matrix[0][i] + matrix[i][last]`, a lower-bound
/// proxy for how good a detour through `i` alone would be. The proxy is not
/// order-aware, so the cheapest `SHORTLIST_LEN` are kept and every visiting
/// order of that subset is evaluated exactly against the matrix. Fewer
/// discovered waypoints shrink the shortlist; orderings of whatever is
/// available are still searched.
///
/// Returns the full index path `[0, p1, .., pk, last]` with the minimum
/// summed directional distance, or `None` when the matrix has no waypoint
/// rows at all. Ties keep the first ordering generated.
pub fn best_combined_path(matrix: &[Vec<f64>]) -> Option<Vec<usize>> {
    let n = matrix.len();
    if n < 3 {
        return None;
    }
    let origin = 0;
    let destination = n - 1;

    let mut scored: Vec<(f64, usize)> = (1..destination)
        .map(|i| (matrix[origin][i] + matrix[i][destination], i))
        .collect();
    scored.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    scored.truncate(SHORTLIST_LEN);
    let shortlist: Vec<usize> = scored.into_iter().map(|(_, i)| i).collect();

    let mut best: Option<(f64, Vec<usize>)> = None;
    for ordering in permutations(&shortlist) {
        let mut path = Vec::with_capacity(ordering.len() + 2);
        path.push(origin);
        path.extend(ordering);
        path.push(destination);

        let total: f64 = path.windows(2).map(|leg| matrix[leg[0]][leg[1]]).sum();
        let improved = match &best {
            Some((best_total, _)) => total < *best_total,
            None => true,
        };
        if improved {
            best = Some((total, path));
        }
    }

    best.map(|(total, path)| {
        tracing::debug!(total_m = total, ?path, "combined-path search finished");
        path
    })
}

/// Policy B result: the chosen waypoint with its scoring inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuePick {
    /// Index of the chosen waypoint in the candidate list.
    pub index: usize,
    /// Raw price tier as drawn from the price source.
    pub price_tier: f64,
    /// Tier plus the scaled detour penalty.
    pub effective_score: f64,
}

/// Policy B: single best-value waypoint.
///
/// Every waypoint is scored `tier + (detour / 100) * 0.1`, where detour is
/// the extra distance over the direct route floored at zero: each 100 m of
/// detour costs a tenth of a tier. The lowest score wins; the strict `<`
/// scan keeps the first-encountered index on ties.
///
/// `candidates` must be the full candidate list the matrix was built from.
pub fn best_value_waypoint<S: PriceSource>(
    matrix: &[Vec<f64>],
    candidates: &[Coord],
    direct_distance_m: f64,
    prices: &S,
) -> Option<ValuePick> {
    let n = matrix.len();
    if n < 3 {
        return None;
    }
    let origin = 0;
    let destination = n - 1;

    let mut best: Option<ValuePick> = None;
    for i in 1..destination {
        let price_tier = prices.tier_for(candidates[i]);
        let total = matrix[origin][i] + matrix[i][destination];
        let detour = (total - direct_distance_m).max(0.0);
        let effective_score = price_tier + (detour / 100.0) * 0.1;

        let improved = match &best {
            Some(pick) => effective_score < pick.effective_score,
            None => true,
        };
        if improved {
            best = Some(ValuePick {
                index: i,
                price_tier,
                effective_score,
            });
        }
    }

    best
}

/// All orderings of `items`, in lexicographic order of the input positions
/// (the first item leads the first `(len-1)!` orderings, and so on).
fn permutations(items: &[usize]) -> Vec<Vec<usize>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }

    let mut all = Vec::new();
    for (i, &item) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, item);
            all.push(tail);
        }
    }
    all
}
