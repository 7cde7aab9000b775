//! # Fingering Module
//!
//! Chooses one position per note so that the hand travels as little as
//! possible between consecutive notes.

use crate::fretboard::Position;

/// Straight-line distance between two positions in (string, fret) space.
pub fn distance(a: Position, b: Position) -> f64 {
    let strings = a.string as f64 - b.string as f64;
    let frets = a.fret as f64 - b.fret as f64;
    (strings * strings + frets * frets).sqrt()
}

/// Summed distance of walking `path` in order.
pub fn total_distance(path: &[Position]) -> f64 {
    path.windows(2).map(|pair| distance(pair[0], pair[1])).sum()
}

/// Picks one position from each group minimizing the total distance between
/// consecutive picks.
///
/// Runs a shortest-path pass over the groups instead of enumerating every
/// combination. On ties the candidate that comes first in its group wins.
///
/// # Returns
/// * `Some(path)` - One position per group, in group order
/// * `None` - If there are no groups or any group is empty
pub fn least_distance(groups: &[Vec<Position>]) -> Option<Vec<Position>> {
    let (first, rest) = groups.split_first()?;
    if first.is_empty() {
        return None;
    }

    let mut costs = vec![0.0; first.len()];
    // back[g][j]: index in group g of the predecessor of candidate j of group g + 1
    let mut back: Vec<Vec<usize>> = Vec::with_capacity(rest.len());
    let mut previous = first;

    for group in rest {
        if group.is_empty() {
            return None;
        }
        let mut next_costs = Vec::with_capacity(group.len());
        let mut links = Vec::with_capacity(group.len());
        for &candidate in group {
            let mut best = (f64::INFINITY, 0);
            for (i, &from) in previous.iter().enumerate() {
                let cost = costs[i] + distance(from, candidate);
                if cost < best.0 {
                    best = (cost, i);
                }
            }
            next_costs.push(best.0);
            links.push(best.1);
        }
        costs = next_costs;
        back.push(links);
        previous = group;
    }

    let mut index = costs
        .iter()
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, &cost)| {
            if cost < best.1 { (i, cost) } else { best }
        })
        .0;

    let mut path = Vec::with_capacity(groups.len());
    path.push(groups[groups.len() - 1][index]);
    for (g, links) in back.iter().enumerate().rev() {
        index = links[index];
        path.push(groups[g][index]);
    }
    path.reverse();
    Some(path)
}
