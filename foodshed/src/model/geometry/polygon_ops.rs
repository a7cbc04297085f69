use geo::{BooleanOps, MultiPolygon};
use rayon::prelude::*;

/// unions all parts with a pairwise reduction. the result only depends on the
/// order of `parts`, never on thread scheduling. returns `None` when there is
/// nothing to union, which callers treat as "no coverage".
pub fn union_all(mut parts: Vec<MultiPolygon<f64>>, parallelize: bool) -> Option<MultiPolygon<f64>> {
    while parts.len() > 1 {
        let merge = |pair: &[MultiPolygon<f64>]| match pair {
            [a, b] => a.union(b),
            [a] => a.clone(),
            _ => MultiPolygon::new(vec![]),
        };
        parts = if parallelize {
            parts.par_chunks(2).map(merge).collect()
        } else {
            parts.chunks(2).map(merge).collect()
        };
    }
    parts.pop()
}

/// `a` minus `b`, or `a` unchanged when there is no `b`
pub fn difference(a: &MultiPolygon<f64>, b: Option<&MultiPolygon<f64>>) -> MultiPolygon<f64> {
    match b {
        Some(b) => a.difference(b),
        None => a.clone(),
    }
}

/// `a` clipped to `b`, or `None` when there is no `a`
pub fn intersection(
    a: Option<&MultiPolygon<f64>>,
    b: &MultiPolygon<f64>,
) -> Option<MultiPolygon<f64>> {
    a.map(|a| a.intersection(b))
}
